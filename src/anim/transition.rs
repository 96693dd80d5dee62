use crate::anim::interpolator::{DrawingModel, DrawingModelInterpolator};

/// Phase of a layer's animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState {
    Idle,
    Animating { fraction: f64 },
}

/// Drives one layer's drawing model through staged transitions.
///
/// Exactly one transition is staged at a time. Staging while a run is in
/// flight rebases on the in-flight target, so no frame ever interpolates from
/// a stale starting point. The host frame clock calls [`Transition::frame`]
/// with a fraction that increases monotonically from 0 to 1 per run; calls
/// are cooperative, never concurrent for one instance.
#[derive(Debug, Clone)]
pub struct Transition<M> {
    interpolator: DrawingModelInterpolator<M>,
    /// Model the layer renders with right now.
    live: Option<M>,
    /// Final model of the most recently staged transition.
    target: Option<M>,
    state: TransitionState,
}

impl<M: DrawingModel> Default for Transition<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: DrawingModel> Transition<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            interpolator: DrawingModelInterpolator::new(),
            live: None,
            target: None,
            state: TransitionState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// The drawing model a draw pass should use, if any.
    #[must_use]
    pub fn live(&self) -> Option<&M> {
        self.live.as_ref()
    }

    /// Stages a transition toward `new`. `None` fades the layer out.
    pub fn stage(&mut self, new: Option<M>) {
        let old = match self.state {
            // Rebase on the in-flight target, not the partially blended frame.
            TransitionState::Animating { .. } => self.target.clone(),
            TransitionState::Idle => self.live.clone(),
        };
        self.target = new.clone();
        self.interpolator.set_models(old, new);
        self.state = TransitionState::Animating { fraction: 0.0 };
    }

    /// Advances the staged run to `fraction` and returns the frame's model.
    ///
    /// At `fraction >= 1` the run completes: the live model becomes exactly
    /// the staged target and the transition returns to `Idle`.
    pub fn frame(&mut self, fraction: f64) -> Option<&M> {
        if self.state == TransitionState::Idle {
            return self.live.as_ref();
        }
        self.live = self.interpolator.transform(fraction);
        self.state = if fraction >= 1.0 {
            TransitionState::Idle
        } else {
            TransitionState::Animating { fraction }
        };
        self.live.as_ref()
    }

    /// Cancels an in-flight run at a frame boundary.
    ///
    /// With `jump_to_end` the live model snaps to the staged target;
    /// otherwise the last completed frame stays live. Either way the model is
    /// in a well-defined state afterwards.
    pub fn cancel(&mut self, jump_to_end: bool) {
        if matches!(self.state, TransitionState::Animating { .. }) {
            if jump_to_end {
                self.live = self.target.clone();
            }
            self.state = TransitionState::Idle;
        }
    }
}
