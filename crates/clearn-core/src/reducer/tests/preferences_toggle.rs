use super::*;
use pretty_assertions::assert_eq;

#[test]
fn initial_effects_apply_without_persisting() {
    let state = SiteState::new(ThemeState::Light, FontScale::Large, REPLY_DELAY);
    let effects = initial_effects(&state);
    assert_eq!(
        effects,
        vec![
            SiteEffect::ApplyTheme(ThemeState::Light),
            SiteEffect::ApplyFontScale(FontScale::Large),
            SiteEffect::ActivateQuote {
                previous: None,
                index: 0,
            },
        ]
    );
}

#[test]
fn theme_toggle_applies_then_persists() {
    let mut state = state();

    let effects = run_user(&mut state, UserAction::ToggleTheme);
    assert_eq!(state.theme.state(), ThemeState::Light);
    assert_eq!(
        effects,
        vec![
            SiteEffect::ApplyTheme(ThemeState::Light),
            SiteEffect::PersistPreference {
                key: THEME_KEY,
                value: "light",
            },
        ]
    );

    let effects = run_user(&mut state, UserAction::ToggleTheme);
    assert_eq!(state.theme.state(), ThemeState::Dark);
    assert_eq!(
        effects,
        vec![
            SiteEffect::ApplyTheme(ThemeState::Dark),
            SiteEffect::PersistPreference {
                key: THEME_KEY,
                value: "dark",
            },
        ]
    );
}

#[test]
fn reapplying_theme_is_idempotent() {
    let state = state();
    assert_eq!(state.theme.apply(), state.theme.apply());
    assert_eq!(state.theme.state(), ThemeState::Dark);
}

#[test]
fn font_toggle_persists_its_own_key_only() {
    let mut state = state();

    let effects = run_user(&mut state, UserAction::ToggleFontScale);
    assert_eq!(state.font_scale.scale(), FontScale::Large);
    assert_eq!(state.theme.state(), ThemeState::Dark);
    assert_eq!(
        effects,
        vec![
            SiteEffect::ApplyFontScale(FontScale::Large),
            SiteEffect::PersistPreference {
                key: FONT_SCALE_KEY,
                value: "large",
            },
        ]
    );
}

#[test]
fn stored_values_map_to_states() {
    assert_eq!(ThemeState::from_stored(Some("light")), ThemeState::Light);
    assert_eq!(ThemeState::from_stored(Some("dark")), ThemeState::Dark);
    assert_eq!(ThemeState::from_stored(Some("sepia")), ThemeState::Dark);
    assert_eq!(ThemeState::from_stored(None), ThemeState::Dark);

    assert_eq!(FontScale::from_stored(Some("large")), FontScale::Large);
    assert_eq!(FontScale::from_stored(Some("medium")), FontScale::Medium);
    assert_eq!(FontScale::from_stored(Some("huge")), FontScale::Medium);
    assert_eq!(FontScale::from_stored(None), FontScale::Medium);
}
