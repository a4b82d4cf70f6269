//! Input listener bound to a running game.

use crate::game_state::{Effect, GameState};
use crate::input::InputEvent;
use crate::service::WordService;
use crate::word::Word;
use crate::{debug_log, info_log};

/// Callback that turns the current state and an event into the next state.
pub type InputListener<'a> = Box<dyn FnMut(GameState, InputEvent) -> (GameState, Effect) + 'a>;

/// Owns a [`GameState`] and the listener that input events are routed to.
///
/// The listener is dropped as soon as the game reaches a terminal state;
/// from then on every event is ignored.
pub struct Session<'a> {
    state: GameState,
    listener: Option<InputListener<'a>>,
}

impl<'a> Session<'a> {
    /// A session with no listener; events are ignored until one is
    /// registered.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            listener: None,
        }
    }

    /// Start a game on `secret`, validating guesses through `service`.
    #[must_use]
    pub fn start(secret: Word, service: &'a dyn WordService) -> Self {
        let mut session = Self::new(GameState::new(secret));
        session.register(Box::new(move |state: GameState, event: InputEvent| {
            state.handle(event, service)
        }));
        session
    }

    /// Replace the listener. Terminal states never get one.
    pub fn register(&mut self, listener: InputListener<'a>) {
        if self.state.is_terminal() {
            debug_log!("register() - game already over, listener dropped");
            return;
        }
        self.listener = Some(listener);
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Route one event through the listener.
    pub fn dispatch(&mut self, event: InputEvent) -> Effect {
        let Some(listener) = self.listener.as_mut() else {
            return Effect::Ignored;
        };
        let (next, effect) = listener(self.state.clone(), event);
        self.state = next;
        if self.state.is_terminal() {
            info_log!("dispatch() - game over, removing input listener");
            self.listener = None;
        }
        effect
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("listening", &self.is_listening())
            .finish()
    }
}
