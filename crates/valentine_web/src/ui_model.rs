//! UI text and element identifiers that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! page inventory on the host.

/// `<script type="application/json">` element holding an optional page config.
pub const CONFIG_ELEMENT_ID: &str = "valentine-config";

pub const PLAY_FAILED_HINT: &str = "Tap again to play the music";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopAction {
    Music,
    Share,
}

impl TopAction {
    pub fn label(self, music_playing: bool) -> &'static str {
        match self {
            TopAction::Music if music_playing => "Pause music",
            TopAction::Music => "Play music",
            TopAction::Share => "Share",
        }
    }

    pub fn icon(self, music_playing: bool) -> &'static str {
        match self {
            TopAction::Music if music_playing => "🔊",
            TopAction::Music => "🔈",
            TopAction::Share => "💌",
        }
    }

    pub fn all() -> &'static [TopAction] {
        &[TopAction::Music, TopAction::Share]
    }
}

pub fn greeting(name: &str) -> String {
    format!("{name}, will you be my Valentine?")
}

/// Alt text for the carousel slide at 0-based `index`.
pub fn slide_alt(index: usize) -> String {
    format!("Photo {}", index + 1)
}

pub fn dot_label(index: usize, count: usize) -> String {
    format!("Show photo {} of {}", index + 1, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_actions_inventory_is_stable() {
        let all = TopAction::all();
        assert_eq!(all.len(), 2);
        for a in all {
            for playing in [false, true] {
                assert!(!a.label(playing).trim().is_empty());
                assert!(!a.icon(playing).trim().is_empty());
            }
        }
        assert_ne!(
            TopAction::Music.label(true),
            TopAction::Music.label(false)
        );
    }

    #[test]
    fn labels_are_one_based() {
        assert_eq!(slide_alt(0), "Photo 1");
        assert_eq!(dot_label(2, 5), "Show photo 3 of 5");
        assert_eq!(greeting("Sam"), "Sam, will you be my Valentine?");
    }
}
