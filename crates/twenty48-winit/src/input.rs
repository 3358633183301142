//! Translates winit input events into [`Msg`] values.

use std::time::Instant;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key as WKey, ModifiersState, NamedKey};

use twenty48_view::{Key, ModMask, Msg};

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Translate a key press. Winit does not carry modifiers on [`KeyEvent`],
/// so the caller tracks them from `ModifiersChanged`.
pub(crate) fn translate_keyboard(event: &KeyEvent, mods: ModifiersState) -> Option<Msg> {
    if event.state != ElementState::Pressed {
        return None;
    }
    let key = map_key(&event.logical_key)?;
    let modifiers = to_mod_mask(mods);
    if key == Key::Char('c') && modifiers.contains(ModMask::CTRL) {
        return Some(Msg::Quit);
    }
    Some(Msg::KeyDown {
        key,
        modifiers,
        time: Instant::now(),
    })
}

fn map_key(key: &WKey) -> Option<Key> {
    let key = match key {
        WKey::Named(named) => match named {
            NamedKey::ArrowUp => Key::ArrowUp,
            NamedKey::ArrowDown => Key::ArrowDown,
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Space => Key::Space,
            _ => return None,
        },
        WKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Key::Space,
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(key)
}

fn to_mod_mask(mods: ModifiersState) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.shift_key() {
        m = m | ModMask::SHIFT;
    }
    if mods.control_key() {
        m = m | ModMask::CTRL;
    }
    if mods.alt_key() {
        m = m | ModMask::ALT;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys() {
        assert_eq!(map_key(&WKey::Named(NamedKey::ArrowDown)), Some(Key::ArrowDown));
        assert_eq!(map_key(&WKey::Named(NamedKey::Enter)), Some(Key::Enter));
        assert_eq!(map_key(&WKey::Named(NamedKey::Space)), Some(Key::Space));
        assert_eq!(map_key(&WKey::Named(NamedKey::Tab)), None);
        assert_eq!(map_key(&WKey::Named(NamedKey::F1)), None);
    }

    #[test]
    fn single_characters_only() {
        assert_eq!(map_key(&WKey::Character("w".into())), Some(Key::Char('w')));
        assert_eq!(map_key(&WKey::Character("N".into())), Some(Key::Char('N')));
        assert_eq!(map_key(&WKey::Character("ab".into())), None);
    }

    #[test]
    fn modifier_state() {
        let m = to_mod_mask(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(m.contains(ModMask::CTRL | ModMask::SHIFT));
        assert!(!m.contains(ModMask::ALT));
        assert_eq!(to_mod_mask(ModifiersState::empty()), ModMask::NONE);
    }
}
