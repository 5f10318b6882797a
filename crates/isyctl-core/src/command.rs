// ── Command API ──
//
// Every write to the controller is one of these. Each variant maps to a
// node command code plus an optional native-range argument.

use std::fmt;

use crate::model::Level;

/// Node commands understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
pub enum Command {
    #[strum(serialize = "DON")]
    On,
    #[strum(serialize = "DOF")]
    Off,
    /// Skip the ramp animation.
    #[strum(serialize = "DFON")]
    FastOn,
    #[strum(serialize = "DFOF")]
    FastOff,
    /// Controller-side ~3% step up.
    #[strum(serialize = "BRT")]
    Brighten,
    /// Controller-side ~3% step down.
    #[strum(serialize = "DIM")]
    Dim,
    #[strum(serialize = "DON")]
    OnLevel(Level),
}

impl Command {
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Native 0-255 argument appended to the command path.
    pub fn argument(self) -> Option<u8> {
        match self {
            Self::OnLevel(level) => Some(level.to_native()),
            _ => None,
        }
    }

    /// Level changes only make sense on a dimmable channel.
    pub fn requires_dimmable(self) -> bool {
        matches!(self, Self::Brighten | Self::Dim | Self::OnLevel(_))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{}/{arg}", self.code()),
            None => f.write_str(self.code()),
        }
    }
}
