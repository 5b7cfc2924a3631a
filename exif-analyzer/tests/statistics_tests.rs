//! Aggregation properties over generated record sets

use exif_analyzer::models::{Aperture, FileRecord, FocalLength, Iso, ShutterSpeed};
use exif_analyzer::services::{parse_exif_output, PhotoStatistics};

const CAMERAS: [&str; 3] = ["Canon EOS R6", "NIKON Z 6_2", "ILCE-7M4"];
const LENSES: [&str; 4] = ["RF24-105mm F4 L IS USM", "rf24-105mm f4 l is usm", "NIKKOR Z 50mm f/1.8 S", "FE 35mm F1.8"];
const SPEEDS: [&str; 4] = ["1/250", "1/60", "2", "1/8000"];

/// Deterministic mixed record set; every 7th record lacks a lens, every 5th an aperture
fn generate_records(count: usize) -> Vec<FileRecord> {
    (0..count)
        .map(|i| FileRecord {
            camera: Some(CAMERAS[i % CAMERAS.len()].to_string()),
            lens: (i % 7 != 0).then(|| LENSES[i % LENSES.len()].to_string()),
            iso: Some(Iso(100 << (i % 5))),
            shutter_speed: ShutterSpeed::parse(SPEEDS[i % SPEEDS.len()]),
            aperture: (i % 5 != 0).then(|| Aperture::new(1.8 + (i % 4) as f64)).flatten(),
            focal_length: FocalLength::new(24.0 + (i % 6) as f64 * 10.0),
            ..FileRecord::new(format!("IMG_{i:04}.CR3"))
        })
        .collect()
}

#[test]
fn test_table_totals_match_record_counts() {
    let records = generate_records(103);
    let stats = PhotoStatistics::from_records(&records);

    let with_lens = records.iter().filter(|r| r.lens.is_some()).count();
    let with_aperture = records.iter().filter(|r| r.aperture.is_some()).count();
    let with_both = records
        .iter()
        .filter(|r| r.lens.is_some() && r.aperture.is_some())
        .count();
    let with_lens_and_focal = records
        .iter()
        .filter(|r| r.lens.is_some() && r.focal_length.is_some())
        .count();

    assert_eq!(stats.total_photos, 103);
    assert_eq!(stats.cameras.total(), 103);
    assert_eq!(stats.lenses.total(), with_lens);
    assert_eq!(stats.apertures.total(), with_aperture);
    assert_eq!(stats.apertures_by_lens.total(), with_both);
    assert_eq!(stats.focal_lengths_by_lens.total(), with_lens_and_focal);

    for camera in CAMERAS {
        let expected = records
            .iter()
            .filter(|r| r.camera.as_deref() == Some(camera))
            .count();
        assert_eq!(stats.cameras.count(&camera.to_string()), expected);
    }
}

#[test]
fn test_percentages_sum_to_one_hundred() {
    let stats = PhotoStatistics::from_records(&generate_records(57));

    let sums = [
        stats.cameras.ranked().iter().map(|e| e.percentage).sum::<f64>(),
        stats.iso_values.ranked().iter().map(|e| e.percentage).sum::<f64>(),
        stats.shutter_speeds.ranked().iter().map(|e| e.percentage).sum::<f64>(),
    ];
    for sum in sums {
        assert!((sum - 100.0).abs() < 1e-6, "sum was {}", sum);
    }

    for (lens, table) in stats.apertures_by_lens.groups() {
        let sum: f64 = table.ranked().iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6, "lens {} summed to {}", lens, sum);
    }
}

#[test]
fn test_ranking_independent_of_input_order() {
    let records = generate_records(40);
    let mut shuffled = records.clone();
    // Deterministic reordering: reverse, then rotate
    shuffled.reverse();
    shuffled.rotate_left(13);

    let a = PhotoStatistics::from_records(&records);
    let b = PhotoStatistics::from_records(&shuffled);

    let cameras_a: Vec<_> = a.cameras.ranked().iter().map(|e| (e.value.clone(), e.count)).collect();
    let cameras_b: Vec<_> = b.cameras.ranked().iter().map(|e| (e.value.clone(), e.count)).collect();
    assert_eq!(cameras_a, cameras_b);

    let speeds_a: Vec<_> = a.shutter_speeds.ranked().iter().map(|e| e.value.to_string()).collect();
    let speeds_b: Vec<_> = b.shutter_speeds.ranked().iter().map(|e| e.value.to_string()).collect();
    assert_eq!(speeds_a, speeds_b);

    assert_eq!(a.lenses, b.lenses);
    assert_eq!(a.apertures_by_lens, b.apertures_by_lens);
    assert_eq!(a.focal_lengths_by_lens, b.focal_lengths_by_lens);
}

#[test]
fn test_lens_spellings_share_one_group() {
    let stats = PhotoStatistics::from_records(&generate_records(28));

    // The two RF spellings collapse into one canonical group
    assert_eq!(stats.lenses.len(), 3);
    let groups: Vec<&str> = stats.apertures_by_lens.groups().map(|(lens, _)| lens).collect();
    let mut sorted = groups.clone();
    sorted.sort();
    assert_eq!(groups, sorted);
}

#[test]
fn test_top_ten_truncation() {
    let records: Vec<FileRecord> = (0..15u32)
        .flat_map(|n| {
            (0..=n).map(move |_| FileRecord {
                iso: Some(Iso(100 + n * 100)),
                ..FileRecord::new("x.NEF")
            })
        })
        .collect();
    let stats = PhotoStatistics::from_records(&records);

    let top = stats.iso_values.top(10);
    assert_eq!(top.len(), 10);
    assert_eq!(*top[0].value, Iso(1500));
    assert_eq!(top[0].count, 15);
    assert_eq!(stats.iso_values.len(), 15);
}

#[test]
fn test_unknown_iso_is_not_a_category() {
    let records = vec![
        parse_exif_output("ISO : 0\nCamera ISO : 200\n", "a.NEF"),
        parse_exif_output("ISO : 0\nF Number : 4.0\n", "b.NEF"),
    ];
    let stats = PhotoStatistics::from_records(&records);

    assert_eq!(stats.iso_values.count(&Iso(0)), 0);
    assert_eq!(stats.iso_values.count(&Iso(200)), 1);
    assert_eq!(stats.iso_values.total(), 1);
}
