use idle_reaper_domain::{AlarmName, TabId};

#[test]
fn test_alarm_name_for_tab() {
    let name = AlarmName::for_tab(TabId(42));
    assert_eq!(name.as_str(), "tab-42");
    assert_eq!(name.to_string(), "tab-42");
}

#[test]
fn test_alarm_name_parses_tab_id() {
    assert_eq!(AlarmName::new("tab-7").tab_id(), Some(TabId(7)));
    assert_eq!(AlarmName::for_tab(TabId(123456)).tab_id(), Some(TabId(123456)));
}

#[test]
fn test_alarm_name_rejects_foreign_names() {
    assert_eq!(AlarmName::new("sync-hourly").tab_id(), None);
    assert_eq!(AlarmName::new("tab-").tab_id(), None);
    assert_eq!(AlarmName::new("tab-12-extra").tab_id(), None);
    assert_eq!(AlarmName::new("tab--3").tab_id(), None);
    assert_eq!(AlarmName::new("tab-+3").tab_id(), None);
    assert_eq!(AlarmName::new("TAB-3").tab_id(), None);
}

#[test]
fn test_alarm_name_rejects_overflowing_id() {
    assert_eq!(AlarmName::new("tab-99999999999999999999999").tab_id(), None);
}

#[test]
fn test_alarm_name_rejects_leading_zeros() {
    assert_eq!(AlarmName::new("tab-007").tab_id(), None);
    assert_eq!(AlarmName::new("tab-00").tab_id(), None);
    assert_eq!(AlarmName::new("tab-0").tab_id(), Some(TabId(0)));
}
