use tcxflat::{tcx_to_csv, TcxError};

/// Integration tests that exercise the complete bytes-in, three-tables-out
/// conversion.

const ACTIVITY_HEADER: &str = "ActivityId;ActivitySport;CreatorName;ProductID";
const LAP_HEADER: &str = "ActivityId;LapNumber;TotalTimeSeconds;DistanceMeters;Calories;\
AverageHeartRateBpm;MaximumHeartRateBpm;MaximumSpeed;AvgRunCadence;MaxRunCadence;\
Intensity;StartTime;TriggerMethod";
const TRACK_HEADER: &str = "ActivityId;LapNumber;TrackNumber;AltitudeMeters;DistanceMeters;\
RunCadence;Speed;HeartRateBpm;LatitudeDegrees;LongitudeDegrees;Time";

/// The worked example: one activity, one lap, two trackpoints, one of them
/// carrying only a timestamp.
const EXAMPLE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2"
                        xmlns:ns3="http://www.garmin.com/xmlschemas/ActivityExtension/v2">
  <Activities>
    <Activity Sport="Running">
      <Id>123</Id>
      <Lap StartTime="2024-01-01T10:00:00Z">
        <TotalTimeSeconds>600</TotalTimeSeconds>
        <Track>
          <Trackpoint>
            <Time>2024-01-01T10:00:01Z</Time>
            <Position>
              <LatitudeDegrees>45.0</LatitudeDegrees>
              <LongitudeDegrees>7.0</LongitudeDegrees>
            </Position>
            <AltitudeMeters>250.0</AltitudeMeters>
            <DistanceMeters>5.0</DistanceMeters>
            <HeartRateBpm><Value>130</Value></HeartRateBpm>
            <Extensions>
              <ns3:TPX>
                <ns3:Speed>2.9</ns3:Speed>
                <ns3:RunCadence>78</ns3:RunCadence>
              </ns3:TPX>
            </Extensions>
          </Trackpoint>
          <Trackpoint>
            <Time>2024-01-01T10:00:02Z</Time>
          </Trackpoint>
        </Track>
      </Lap>
    </Activity>
  </Activities>
</TrainingCenterDatabase>"#;

fn lines(buf: &[u8]) -> Vec<String> {
    String::from_utf8(buf.to_vec())
        .expect("tables are UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_worked_example_produces_expected_tables() {
    let bundle = tcx_to_csv(EXAMPLE_DOC.as_bytes()).unwrap();

    assert_eq!(
        lines(&bundle.activities),
        vec![ACTIVITY_HEADER.to_string(), "123;Running;;".to_string()]
    );

    assert_eq!(
        lines(&bundle.laps),
        vec![
            LAP_HEADER.to_string(),
            "123;1;600;;;;;;;;;2024-01-01T10:00:00Z;".to_string()
        ]
    );

    assert_eq!(
        lines(&bundle.tracks),
        vec![
            TRACK_HEADER.to_string(),
            "123;1;1;250.0;5.0;78;2.9;130;45.0;7.0;2024-01-01T10:00:01Z".to_string(),
            "123;1;2;;;;;;;;2024-01-01T10:00:02Z".to_string(),
        ]
    );
}

#[test]
fn test_zero_activities_yields_header_only_tables() {
    let doc = r#"<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
        <Folders/>
    </TrainingCenterDatabase>"#;
    let bundle = tcx_to_csv(doc.as_bytes()).unwrap();
    assert_eq!(lines(&bundle.activities), vec![ACTIVITY_HEADER.to_string()]);
    assert_eq!(lines(&bundle.laps), vec![LAP_HEADER.to_string()]);
    assert_eq!(lines(&bundle.tracks), vec![TRACK_HEADER.to_string()]);
}

#[test]
fn test_conversion_is_idempotent() {
    let first = tcx_to_csv(EXAMPLE_DOC.as_bytes()).unwrap();
    let second = tcx_to_csv(EXAMPLE_DOC.as_bytes()).unwrap();
    assert_eq!(first.activities, second.activities);
    assert_eq!(first.laps, second.laps);
    assert_eq!(first.tracks, second.tracks);
}

#[test]
fn test_malformed_xml_yields_parse_error_and_no_output() {
    let result = tcx_to_csv(b"<TrainingCenterDatabase><Activities><Activity>");
    assert!(matches!(result, Err(TcxError::Parse(_))));
}

#[test]
fn test_activity_order_and_sport_default() {
    let doc = r#"<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
      <Activities>
        <Activity Sport="Biking"><Id>first</Id></Activity>
        <Activity><Id>second</Id></Activity>
        <Activity Sport="Running"><Id>third</Id></Activity>
      </Activities>
    </TrainingCenterDatabase>"#;
    let bundle = tcx_to_csv(doc.as_bytes()).unwrap();
    assert_eq!(
        lines(&bundle.activities),
        vec![
            ACTIVITY_HEADER.to_string(),
            "first;Biking;;".to_string(),
            "second;Unknown;;".to_string(),
            "third;Running;;".to_string(),
        ]
    );
}

#[test]
fn test_field_values_round_trip_through_a_csv_reader() {
    // An activity id holding the delimiter and a quote must come back
    // byte-identical after a read with a conforming parser.
    let doc = r#"<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2">
      <Activities>
        <Activity><Id>odd;id "quoted"</Id></Activity>
      </Activities>
    </TrainingCenterDatabase>"#;
    let bundle = tcx_to_csv(doc.as_bytes()).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(bundle.activities.as_slice());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[0], r#"odd;id "quoted""#);
    assert_eq!(&record[1], "Unknown");
}

#[test]
fn test_artifacts_written_to_disk() {
    let bundle = tcx_to_csv(EXAMPLE_DOC.as_bytes()).unwrap();
    let dir = tempfile::tempdir().unwrap();

    for (name, content, mime) in bundle.artifacts() {
        assert_eq!(mime, "text/csv");
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    let activities = std::fs::read(dir.path().join("activities.csv")).unwrap();
    assert_eq!(activities, bundle.activities);
    assert!(dir.path().join("laps.csv").exists());
    assert!(dir.path().join("tracks.csv").exists());
}
