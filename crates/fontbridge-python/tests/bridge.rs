//! Bridge behaviour against real runtime objects

use fontbridge_config::Config;
use fontbridge_python::{
    Bridge, BridgeError, FeatureRecord, ForeignHandle, NameRecord, RuntimeErrorKind, Session, Tag,
};

fn namespace(bridge: &Bridge<'_>) -> Result<ForeignHandle, BridgeError> {
    let types = bridge.import("types")?;
    let ns = bridge.call_method(&types, "SimpleNamespace", &[])?;
    types.release(bridge);
    ns.ok_or(BridgeError::ForeignNullResult {
        context: "SimpleNamespace()".to_string(),
    })
}

/// A session on fontforge, or `None` when it is not installed here
fn fontforge_session() -> Option<Session> {
    let config = Config {
        module: Some("fontforge".to_string()),
        ..Config::default()
    };
    Session::initialize(&config).ok()
}

#[test]
fn attribute_assignment_is_shared_between_aliases() {
    let result = Bridge::detached(|bridge| {
        let ns = namespace(bridge)?;
        let alias = ns.retain(bridge);

        bridge.set(&ns, "upos", &-100.0_f64)?;
        bridge.set(&ns, "uwidth", &50.0_f64)?;
        let upos: f64 = bridge.get(&alias, "upos")?;
        let uwidth: f64 = bridge.get(&alias, "uwidth")?;
        bridge.set(&alias, "upos", &(upos + uwidth))?;

        assert!((bridge.get::<f64>(&ns, "upos")? + 50.0).abs() < f64::EPSILON);
        alias.release(bridge);
        ns.release(bridge);
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn name_records_round_trip_through_a_list() {
    let result = Bridge::detached(|bridge| {
        let ns = namespace(bridge)?;
        let names = vec![
            NameRecord::new("English (US)", "Family", "Demo"),
            NameRecord::new("English (US)", "Version", "Version 1.0"),
        ];
        bridge.set(&ns, "sfnt_names", &names)?;
        let back: Vec<NameRecord> = bridge.get(&ns, "sfnt_names")?;
        assert_eq!(back, names);
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn feature_record_is_sent_as_nested_tuples() {
    let result = Bridge::detached(|bridge| {
        let builtins = bridge.import("builtins")?;
        let feature =
            FeatureRecord::new(Tag::new("a")?).with_script(Tag::new("latn")?, [Tag::new("b")?]);
        let repr: String = bridge.call(&builtins, "repr", &[&feature])?;
        assert_eq!(repr, "('a   ', (('latn', ('b   ',)),))");
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn missing_key_is_a_null_result_not_an_error() {
    let result = Bridge::detached(|bridge| {
        let builtins = bridge.import("builtins")?;
        let glyphs = bridge
            .call_method(&builtins, "dict", &[&vec![("A", 65_i64), ("B", 66)]])?
            .ok_or(BridgeError::ForeignNullResult {
                context: "dict()".to_string(),
            })?;

        assert!(!bridge.has_item(&glyphs, &"nonexistent-glyph")?);
        assert!(bridge.get_item(&glyphs, &"nonexistent-glyph")?.is_none());

        // only a lookup error means "not found"; anything else propagates
        let ns = namespace(bridge)?;
        let err = bridge.get_item(&ns, &"A");
        assert_eq!(
            err.err().and_then(|e| e.runtime_kind().cloned()),
            Some(RuntimeErrorKind::Type)
        );
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result.err());
}

#[test]
fn open_missing_file_reports_runtime_file_error() {
    let Some(session) = fontforge_session() else {
        return;
    };
    let result = session.run(|bridge| {
        let fontforge = bridge.module()?;
        bridge.call_method(&fontforge, "open", &[&"/nonexistent/font.sfd"])
    });
    assert!(result.is_err());
}

#[test]
fn fontforge_font_properties() {
    let Some(session) = fontforge_session() else {
        return;
    };
    let result = session.run(|bridge| {
        let fontforge = bridge.module()?;
        let font = bridge
            .call_method(&fontforge, "font", &[])?
            .ok_or(BridgeError::ForeignNullResult {
                context: "fontforge.font()".to_string(),
            })?;

        bridge.set(&font, "fontname", "Demo-Regular")?;
        assert_eq!(bridge.get::<String>(&font, "fontname")?, "Demo-Regular");

        let missing = bridge.get_attribute(&font, "nonexistent_property");
        assert!(matches!(missing, Err(BridgeError::AttributeNotFound { .. })));

        assert!(!bridge.has_item(&font, &"nonexistent-glyph")?);
        bridge.call_method(&font, "close", &[])?;
        Ok(())
    });
    assert!(result.is_ok(), "{:?}", result.err());
}
