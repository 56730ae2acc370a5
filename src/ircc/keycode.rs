//! IRCC key codes.
//!
//! The table mirrors the codes Sony documents for Bravia displays. Any other
//! string is accepted too; only the display decides whether a code is valid.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque token for one remote-control button press.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(Cow<'static, str>);

impl KeyCode {
    /// Wrap a caller-supplied code. No validation is performed.
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for KeyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

macro_rules! key_codes {
    ($($konst:ident => $name:literal, $code:literal;)*) => {
        $(
            pub const $konst: KeyCode = KeyCode::from_static($code);
        )*

        /// Every documented key, in remote-control order.
        pub const KEY_CODES: &[(&str, KeyCode)] = &[
            $(($name, $konst),)*
        ];
    };
}

key_codes! {
    POWER => "Power", "AAAAAQAAAAEAAAAVAw==";
    INPUT => "Input", "AAAAAQAAAAEAAAAlAw==";
    SYNC_MENU => "SyncMenu", "AAAAAgAAABoAAABYAw==";
    HDMI1 => "Hdmi1", "AAAAAgAAABoAAABaAw==";
    HDMI2 => "Hdmi2", "AAAAAgAAABoAAABbAw==";
    HDMI3 => "Hdmi3", "AAAAAgAAABoAAABcAw==";
    HDMI4 => "Hdmi4", "AAAAAgAAABoAAABdAw==";
    NUM1 => "Num1", "AAAAAQAAAAEAAAAAAw==";
    NUM2 => "Num2", "AAAAAQAAAAEAAAABAw==";
    NUM3 => "Num3", "AAAAAQAAAAEAAAACAw==";
    NUM4 => "Num4", "AAAAAQAAAAEAAAADAw==";
    NUM5 => "Num5", "AAAAAQAAAAEAAAAEAw==";
    NUM6 => "Num6", "AAAAAQAAAAEAAAAFAw==";
    NUM7 => "Num7", "AAAAAQAAAAEAAAAGAw==";
    NUM8 => "Num8", "AAAAAQAAAAEAAAAHAw==";
    NUM9 => "Num9", "AAAAAQAAAAEAAAAIAw==";
    NUM0 => "Num0", "AAAAAQAAAAEAAAAJAw==";
    DOT => "Dot", "AAAAAgAAAJcAAAAdAw==";
    CC => "CC", "AAAAAgAAAJcAAAAoAw==";
    RED => "Red", "AAAAAgAAAJcAAAAlAw==";
    GREEN => "Green", "AAAAAgAAAJcAAAAmAw==";
    YELLOW => "Yellow", "AAAAAgAAAJcAAAAnAw==";
    BLUE => "Blue", "AAAAAgAAAJcAAAAkAw==";
    UP => "Up", "AAAAAQAAAAEAAAB0Aw==";
    DOWN => "Down", "AAAAAQAAAAEAAAB1Aw==";
    RIGHT => "Right", "AAAAAQAAAAEAAAAzAw==";
    LEFT => "Left", "AAAAAQAAAAEAAAA0Aw==";
    CONFIRM => "Confirm", "AAAAAQAAAAEAAABlAw==";
    HELP => "Help", "AAAAAgAAAMQAAABNAw==";
    DISPLAY => "Display", "AAAAAQAAAAEAAAA6Aw==";
    OPTIONS => "Options", "AAAAAgAAAJcAAAA2Aw==";
    BACK => "Back", "AAAAAgAAAJcAAAAjAw==";
    HOME => "Home", "AAAAAQAAAAEAAABgAw==";
    VOLUME_UP => "VolumeUp", "AAAAAQAAAAEAAAASAw==";
    VOLUME_DOWN => "VolumeDown", "AAAAAQAAAAEAAAATAw==";
    MUTE => "Mute", "AAAAAQAAAAEAAAAUAw==";
    AUDIO => "Audio", "AAAAAQAAAAEAAAAXAw==";
    CHANNEL_UP => "ChannelUp", "AAAAAQAAAAEAAAAQAw==";
    CHANNEL_DOWN => "ChannelDown", "AAAAAQAAAAEAAAARAw==";
    PLAY => "Play", "AAAAAgAAAJcAAAAaAw==";
    PAUSE => "Pause", "AAAAAgAAAJcAAAAZAw==";
    STOP => "Stop", "AAAAAgAAAJcAAAAYAw==";
    FLASH_PLUS => "FlashPlus", "AAAAAgAAAJcAAAB4Aw==";
    FLASH_MINUS => "FlashMinus", "AAAAAgAAAJcAAAB5Aw==";
    PREV => "Prev", "AAAAAgAAAJcAAAA8Aw==";
    NEXT => "Next", "AAAAAgAAAJcAAAA9Aw==";
}

/// Look up a documented key by name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static KeyCode> {
    KEY_CODES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, code)| code)
}
