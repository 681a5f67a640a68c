//! Tests against the locale tables shipped in `locales/`

use webcal_l10n::{
    validate_shape, Catalog, L10nError, MonthStyle, TableKind, WeekdayStyle, MONTH_COUNT,
    WEEKDAY_COUNT,
};

const SHIPPED: [&str; 6] = ["en", "es", "it", "nl", "pl", "ro"];

#[test]
fn test_every_locale_is_shipped() {
    let catalog = Catalog::shared();
    let codes: Vec<&str> = catalog.locales().map(|c| c.as_str()).collect();
    assert_eq!(codes, SHIPPED);
    assert_eq!(catalog.default_locale().as_str(), "en");
}

#[test]
fn test_calendar_arrays_have_fixed_lengths() {
    for table in Catalog::shared().tables() {
        let calendar = &table.calendar;
        assert_eq!(calendar.months.len(), MONTH_COUNT, "{} months", table.code());
        assert_eq!(calendar.months_short.len(), MONTH_COUNT, "{} months_m", table.code());
        for style in [
            WeekdayStyle::Full,
            WeekdayStyle::Abbreviated,
            WeekdayStyle::Short,
            WeekdayStyle::Initial,
        ] {
            let days = calendar.weekdays(style);
            assert_eq!(days.len(), WEEKDAY_COUNT, "{} {:?}", table.code(), style);
            assert_eq!(days[0], days[7], "{} {:?} does not wrap", table.code(), style);
        }
        assert_eq!(calendar.dhm.len(), 3, "{} dhm", table.code());
        assert!(validate_shape(table).is_empty(), "{} is malformed", table.code());
    }
}

#[test]
fn test_spanish_admin_strings() {
    let catalog = Catalog::shared();
    assert_eq!(catalog.get_in("es", TableKind::Admin, "set_general_settings").unwrap(), "Calendario");
    assert_eq!(catalog.get_in("es", TableKind::Admin, "no").unwrap(), "no");
    assert_eq!(catalog.get_in("es", TableKind::Admin, "yes").unwrap(), "si");
    assert_eq!(catalog.get("es", "mdb_compact").unwrap(), "Compactar la base de datos");
}

#[test]
fn test_italian_calendar_vocabulary() {
    let catalog = Catalog::shared();
    let it = catalog.table("it").unwrap();
    assert_eq!(it.calendar.months[0], "Gennaio");
    assert_eq!(it.calendar.weekdays[0], "Domenica");
    assert_eq!(it.calendar.weekdays[7], "Domenica");

    assert_eq!(catalog.month_name("it", 1, MonthStyle::Full).unwrap(), "Gennaio");
    assert_eq!(catalog.weekday_name("it", 7, WeekdayStyle::Full).unwrap(), "Domenica");
    assert_eq!(catalog.dhm("it").unwrap(), ["g", "o", "m"]);
}

#[test]
fn test_romanian_gaps_fall_back_to_english() {
    let catalog = Catalog::shared();
    let ro = catalog.table("ro").unwrap();
    assert!(ro.get(TableKind::User, "hdr_view_1").is_none());

    let found = catalog.lookup("ro", None, "hdr_view_1").unwrap();
    assert_eq!(found.value, "View");
    assert!(found.fell_back);
    assert_eq!(found.locale.as_str(), "en");

    assert_eq!(catalog.get("ro", "evt_until").unwrap(), "until");
    assert_eq!(catalog.get("ro", "vws_week").unwrap(), "Săptămână");
}

#[test]
fn test_lookup_errors() {
    let catalog = Catalog::shared();
    assert!(matches!(catalog.get("fr", "yes"), Err(L10nError::LocaleNotFound { .. })));
    assert!(matches!(
        catalog.get("ro", "definitely_not_a_key"),
        Err(L10nError::KeyNotFound { .. })
    ));
    assert_eq!(catalog.get_or_key("ro", "definitely_not_a_key"), "definitely_not_a_key");
}

#[test]
fn test_placeholders_are_left_for_the_caller() {
    let catalog = Catalog::shared();
    assert_eq!(catalog.get("es", "evt_repeat_every").unwrap(), "Repetir cada $1 $2");
    assert_eq!(
        catalog.format("nl", "sch_no_results", &["vergadering"]).unwrap(),
        "Geen afspraken gevonden voor <b>vergadering</b>"
    );
}

#[test]
fn test_multiline_values_are_preserved() {
    let help = Catalog::shared().get_in("it", TableKind::Admin, "help_repeat").unwrap();
    assert_eq!(help.lines().count(), 2);
    assert!(help.starts_with("<b>Ripeti</b>"));
}

#[test]
fn test_negotiation_against_shipped_locales() {
    let catalog = Catalog::shared();
    assert_eq!(catalog.negotiate("es-ES").as_str(), "es");
    assert_eq!(catalog.negotiate("nl_BE").as_str(), "nl");
    assert_eq!(catalog.negotiate("fr-FR").as_str(), "en");
}

#[test]
fn test_concurrent_readers() {
    let catalog = Catalog::shared();
    std::thread::scope(|scope| {
        for code in SHIPPED {
            scope.spawn(move || {
                for month in 1..=12 {
                    assert!(catalog.month_name(code, month, MonthStyle::Abbreviated).is_ok());
                }
                assert!(catalog.has_key(code, "hdr_view_1"));
            });
        }
    });
}
