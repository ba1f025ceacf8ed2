//! Keyboard shortcuts for a focused player.
//!
//! Keys are modeled on the platform's logical key values so hosts can map
//! their native events straight through [`Key::from_dom_key`].

use log::debug;

use crate::PlaybackController;
use crate::backend::{FullscreenSurface, MediaBackend};
use crate::messages::Status;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Named(Named),
    Character(String),
    Unidentified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Named {
    Space,
    Enter,
    Escape,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    F11,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(value: &str) -> Self {
        let named = match value {
            " " | "Spacebar" => Some(Named::Space),
            "Enter" => Some(Named::Enter),
            "Escape" | "Esc" => Some(Named::Escape),
            "Tab" => Some(Named::Tab),
            "ArrowLeft" | "Left" => Some(Named::ArrowLeft),
            "ArrowRight" | "Right" => Some(Named::ArrowRight),
            "ArrowUp" | "Up" => Some(Named::ArrowUp),
            "ArrowDown" | "Down" => Some(Named::ArrowDown),
            "Home" => Some(Named::Home),
            "End" => Some(Named::End),
            "F11" => Some(Named::F11),
            _ => None,
        };

        match named {
            Some(named) => Key::Named(named),
            None if value.chars().count() == 1 => {
                Key::Character(value.to_string())
            }
            None => Key::Unidentified,
        }
    }

    pub fn character(c: char) -> Self {
        Key::Character(c.to_string())
    }
}

/// Player action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePlayPause,
    ToggleMute,
    ToggleFullscreen,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
}

impl KeyCommand {
    /// Character bindings are case-sensitive: `K`, `M` and `F` pass through.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Named(Named::Space) => Some(KeyCommand::TogglePlayPause),
            Key::Named(Named::ArrowLeft) => Some(KeyCommand::SeekBackward),
            Key::Named(Named::ArrowRight) => Some(KeyCommand::SeekForward),
            Key::Named(Named::ArrowUp) => Some(KeyCommand::VolumeUp),
            Key::Named(Named::ArrowDown) => Some(KeyCommand::VolumeDown),
            Key::Character(c) => match c.as_str() {
                "k" => Some(KeyCommand::TogglePlayPause),
                "m" => Some(KeyCommand::ToggleMute),
                "f" => Some(KeyCommand::ToggleFullscreen),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<B, S> PlaybackController<B, S>
where
    B: MediaBackend + FullscreenSurface,
    S: Scheduler,
{
    pub(crate) fn handle_key(&mut self, key: &Key) -> Status {
        let Some(command) = KeyCommand::from_key(key) else {
            return Status::Ignored;
        };

        debug!("[Player] Key {:?} -> {:?}", key, command);

        let seek_step = self.config.seek_step_secs;
        let volume_step = self.config.volume_step;

        match command {
            KeyCommand::TogglePlayPause => self.toggle_play_pause(),
            KeyCommand::ToggleMute => self.toggle_mute(),
            KeyCommand::ToggleFullscreen => self.toggle_fullscreen(),
            KeyCommand::SeekBackward => self.seek_relative(-seek_step),
            KeyCommand::SeekForward => self.seek_relative(seek_step),
            KeyCommand::VolumeUp => self.step_volume(volume_step),
            KeyCommand::VolumeDown => self.step_volume(-volume_step),
        }

        self.reset_controls_timer();
        Status::Captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_keys_map_to_commands() {
        let cases = [
            (" ", Some(KeyCommand::TogglePlayPause)),
            ("k", Some(KeyCommand::TogglePlayPause)),
            ("m", Some(KeyCommand::ToggleMute)),
            ("f", Some(KeyCommand::ToggleFullscreen)),
            ("ArrowLeft", Some(KeyCommand::SeekBackward)),
            ("ArrowRight", Some(KeyCommand::SeekForward)),
            ("ArrowUp", Some(KeyCommand::VolumeUp)),
            ("ArrowDown", Some(KeyCommand::VolumeDown)),
        ];

        for (dom, expected) in cases {
            assert_eq!(
                KeyCommand::from_key(&Key::from_dom_key(dom)),
                expected,
                "key {dom:?}"
            );
        }
    }

    #[test]
    fn test_unbound_keys_pass_through() {
        for dom in ["K", "M", "F", "x", "Enter", "Escape", "F11", "Shift"] {
            assert_eq!(KeyCommand::from_key(&Key::from_dom_key(dom)), None);
        }
    }

    #[test]
    fn test_from_dom_key_shapes() {
        assert_eq!(Key::from_dom_key(" "), Key::Named(Named::Space));
        assert_eq!(Key::from_dom_key("é"), Key::Character("é".into()));
        assert_eq!(Key::from_dom_key("Shift"), Key::Unidentified);
    }
}
