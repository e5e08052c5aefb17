//! Three-position switch reader.

/// Position of a three-position switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TriState {
    /// Only the "down" contact asserted
    Down,
    /// Neither or both contacts asserted
    #[default]
    Neutral,
    /// Only the "up" contact asserted
    Up,
}

impl TriState {
    /// All positions.
    pub const ALL: [TriState; 3] = [TriState::Down, TriState::Neutral, TriState::Up];

    /// Decodes the two contact levels.
    ///
    /// Both asserted reads as neutral, the same as neither.
    #[inline]
    pub fn from_pins(pin_up: bool, pin_down: bool) -> Self {
        if pin_up == pin_down {
            TriState::Neutral
        } else if pin_up {
            TriState::Up
        } else {
            TriState::Down
        }
    }

    /// Contact levels that produce this position.
    pub fn pins(self) -> (bool, bool) {
        match self {
            TriState::Down => (false, true),
            TriState::Neutral => (false, false),
            TriState::Up => (true, false),
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            TriState::Down => "down",
            TriState::Neutral => "neutral",
            TriState::Up => "up",
        }
    }
}

/// A change of switch position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Position before the change.
    pub previous: TriState,
    /// Position after the change.
    pub current: TriState,
}

/// Edge-detecting three-position switch.
///
/// There is no debounce delay; contact bounce is expected to be filtered
/// upstream and the switch to be polled once per control tick.
#[derive(Debug, Clone)]
pub struct TriStateSwitch<H> {
    state: TriState,
    handler: Option<H>,
}

impl<H: Copy> TriStateSwitch<H> {
    /// Creates a switch resting in [`TriState::Neutral`] with no handler.
    pub const fn new() -> Self {
        Self {
            state: TriState::Neutral,
            handler: None,
        }
    }

    /// Binds the change handler.
    pub fn bind(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// The bound handler, if any.
    #[inline]
    pub fn handler(&self) -> Option<H> {
        self.handler
    }

    /// Current position.
    #[inline]
    pub fn state(&self) -> TriState {
        self.state
    }

    /// Sets the position from the contacts without reporting a transition.
    pub fn prime(&mut self, pin_up: bool, pin_down: bool) {
        self.state = TriState::from_pins(pin_up, pin_down);
    }

    /// Samples the contacts.
    ///
    /// Returns the transition when the position differs from the previous
    /// sample. The new position is stored either way, so the next call
    /// compares against it.
    pub fn update(&mut self, pin_up: bool, pin_down: bool) -> Option<Transition> {
        let current = TriState::from_pins(pin_up, pin_down);
        let previous = self.state;
        self.state = current;
        (current != previous).then_some(Transition { previous, current })
    }
}

impl<H: Copy> Default for TriStateSwitch<H> {
    fn default() -> Self {
        Self::new()
    }
}
