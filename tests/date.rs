use ansiview::SauceDate;

#[test]
fn displays_sauce_date() {
    let d = SauceDate::new(2025, 11, 8);
    assert_eq!(d.to_string(), "2025/11/08");
}

#[test]
fn parses_from_bytes() {
    let d = SauceDate::from_bytes(b"19960704").unwrap();
    assert_eq!((d.year, d.month, d.day), (1996, 7, 4));
}

#[test]
fn rejects_malformed_bytes() {
    assert!(SauceDate::from_bytes(b"1996074").is_none());
    assert!(SauceDate::from_bytes(b"199607040").is_none());
    assert!(SauceDate::from_bytes(b"1996-7-4").is_none());
    assert!(SauceDate::from_bytes(b"        ").is_none());
}

#[test]
fn writes_wire_format() {
    assert_eq!(&SauceDate::new(1994, 1, 2).to_bytes(), b"19940102");
    assert_eq!(&SauceDate::new(12_345, 1, 2).to_bytes(), b"99990102");
    assert_eq!(&SauceDate::default().to_bytes(), b"00000000");
}

#[test]
fn empty_date() {
    assert!(SauceDate::default().is_empty());
    assert!(SauceDate::from_bytes(b"00000000").unwrap().is_empty());
    assert!(!SauceDate::new(1990, 1, 1).is_empty());
}

#[test]
fn dates_order_chronologically() {
    assert!(SauceDate::new(1995, 12, 31) < SauceDate::new(1996, 1, 1));
    assert!(SauceDate::new(1996, 2, 1) > SauceDate::new(1996, 1, 31));
}

#[cfg(feature = "chrono")]
#[test]
fn converts_to_chrono() {
    use chrono::NaiveDate;
    let d = SauceDate::new(2000, 2, 29);
    assert_eq!(d.to_naive_date(), NaiveDate::from_ymd_opt(2000, 2, 29));
    assert_eq!(SauceDate::new(2001, 2, 29).to_naive_date(), None);
    assert_eq!(SauceDate::from(NaiveDate::from_ymd_opt(1999, 9, 9).unwrap()), SauceDate::new(1999, 9, 9));
}
