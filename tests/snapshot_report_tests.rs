//! End-to-end tests of the enumeration pass and the rendered report,
//! driven through a stubbed device source.

use audio_endpoint_list::audio::{DeviceState, EndpointSnapshot, PassError, PropertyKey};
use audio_endpoint_list::report::{ReportRenderer, Verbosity};
use audio_endpoint_list::system::{MockDeviceSource, MockEndpoint};

fn populated_endpoint(id: &str, desc: &str) -> MockEndpoint {
    MockEndpoint::new(id)
        .with_state(DeviceState::Active)
        .with_property(PropertyKey::FriendlyName, &format!("{} (Full Name)", desc))
        .with_property(PropertyKey::Description, desc)
        .with_property(PropertyKey::InterfaceFriendlyName, "USB Audio Adapter")
}

#[test]
fn test_report_has_one_line_per_device_in_source_order() {
    let source = MockDeviceSource::new()
        .with_device(populated_endpoint("dev0", "Speakers"))
        .with_device(populated_endpoint("dev1", "Microphone"))
        .with_device(populated_endpoint("dev2", "Headset"))
        .with_device(populated_endpoint("dev3", "Line In"));

    let records = EndpointSnapshot::new(source).capture().unwrap();
    let report = ReportRenderer::new(Verbosity::Verbose).render(&records);

    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.starts_with(&format!("[{}] id=dev{}", i, i)));
    }
}

#[test]
fn test_zero_devices_yields_empty_report_not_an_error() {
    let records = EndpointSnapshot::new(MockDeviceSource::new())
        .capture()
        .unwrap();
    let report = ReportRenderer::new(Verbosity::Verbose).render(&records);
    assert!(report.is_empty());
}

#[test]
fn test_listing_failure_aborts_without_records() {
    let source = MockDeviceSource::new()
        .with_device(populated_endpoint("dev0", "Speakers"))
        .with_listing_failure();

    // Fatal-to-pass: the caller gets no records and produces no report.
    // (The binary logs this and still exits 0.)
    let result = EndpointSnapshot::new(source).capture();
    assert!(matches!(result, Err(PassError::CollectionUnavailable(_))));
}

#[test]
fn test_store_open_failure_keeps_the_line_and_later_devices() {
    // Device 0 fully populated, device 1 with a property-store-open
    // failure, device 2 normal again.
    let source = MockDeviceSource::new()
        .with_device(
            MockEndpoint::new("dev0")
                .with_state(DeviceState::Active)
                .with_property(PropertyKey::FriendlyName, "Speakers (High Definition Audio)")
                .with_property(PropertyKey::Description, "Speakers")
                .with_property(PropertyKey::InterfaceFriendlyName, "High Definition Audio"),
        )
        .with_device(MockEndpoint::new("dev1").with_store_failure())
        .with_device(populated_endpoint("dev2", "Headset"));

    let records = EndpointSnapshot::new(source).capture().unwrap();

    let verbose = ReportRenderer::new(Verbosity::Verbose).render(&records);
    let lines: Vec<_> = verbose.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "[0] id=dev0, state=ACTIVE, name=Speakers (High Definition Audio), \
         desc=Speakers, audioif=High Definition Audio"
    );
    assert_eq!(lines[1], "[1] id=dev1, state=ACTIVE, name=, desc=, audioif=");
    assert!(lines[2].starts_with("[2] id=dev2"));

    // Terse variant: the broken device renders as an index with an empty
    // description, nothing more.
    let terse = ReportRenderer::new(Verbosity::Terse).render(&records);
    assert_eq!(terse, "[0] Speakers\n[1] \n[2] Headset\n");
}

#[test]
fn test_absent_property_affects_only_that_field() {
    let source = MockDeviceSource::new().with_device(
        MockEndpoint::new("dev0")
            .with_property(PropertyKey::Description, "Speakers")
            .with_property(PropertyKey::InterfaceFriendlyName, "USB Audio Adapter"),
    );

    let records = EndpointSnapshot::new(source).capture().unwrap();
    let report = ReportRenderer::new(Verbosity::Verbose).render(&records);

    assert_eq!(
        report,
        "[0] id=dev0, state=ACTIVE, name=, desc=Speakers, audioif=USB Audio Adapter\n"
    );
}

#[test]
fn test_property_read_failure_is_scoped_to_one_field() {
    let source = MockDeviceSource::new().with_device(
        populated_endpoint("dev0", "Speakers").with_property_failure(PropertyKey::FriendlyName),
    );

    let records = EndpointSnapshot::new(source).capture().unwrap();

    assert_eq!(records[0].friendly_name, None);
    assert_eq!(records[0].description.as_deref(), Some("Speakers"));
    assert_eq!(
        records[0].interface_name.as_deref(),
        Some("USB Audio Adapter")
    );
}

#[test]
fn test_unreachable_device_never_aborts_the_pass() {
    let source = MockDeviceSource::new()
        .with_device(populated_endpoint("dev0", "Speakers"))
        .with_device(MockEndpoint::new("dev1").unreachable())
        .with_device(populated_endpoint("dev2", "Headset"));

    let records = EndpointSnapshot::new(source).capture().unwrap();
    let report = ReportRenderer::new(Verbosity::Verbose).render(&records);

    let lines: Vec<_> = report.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "[1] id=, state=UNKNOWN, name=, desc=, audioif=");
}

#[test]
fn test_state_codes_map_deterministically() {
    let source = MockDeviceSource::new()
        .with_device(MockEndpoint::new("a").with_state(DeviceState::Active))
        .with_device(MockEndpoint::new("b").with_state(DeviceState::Disabled))
        .with_device(MockEndpoint::new("c").with_state(DeviceState::NotPresent))
        .with_device(MockEndpoint::new("d").with_state(DeviceState::Unplugged))
        .with_device(MockEndpoint::new("e").with_state_failure());

    let records = EndpointSnapshot::new(source).capture().unwrap();
    let report = ReportRenderer::new(Verbosity::Verbose).render(&records);

    let lines: Vec<_> = report.lines().collect();
    assert!(lines[0].contains("state=ACTIVE"));
    assert!(lines[1].contains("state=DISABLED"));
    assert!(lines[2].contains("state=NOTPRESENT"));
    assert!(lines[3].contains("state=UNPLUGGED"));
    assert!(lines[4].contains("state=UNKNOWN"));
}

#[test]
fn test_snapshot_is_taken_in_a_single_listing_call() {
    let source = MockDeviceSource::new()
        .with_device(populated_endpoint("dev0", "Speakers"))
        .with_device(populated_endpoint("dev1", "Headset"));

    let snapshot = EndpointSnapshot::new(source);
    snapshot.capture().unwrap();

    assert_eq!(snapshot.get_source().list_call_count(), 1);
}
