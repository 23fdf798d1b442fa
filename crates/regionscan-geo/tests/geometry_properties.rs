//! Property tests for bounding box extraction and containment

use geo::{polygon, MultiPolygon, Polygon};
use proptest::prelude::*;
use regionscan_core::models::{AssetRecord, Padding, RegionGeometry};
use regionscan_geo::{envelope, filter_contained, from_geometry, partition_contained, point_in_geometry};

fn rectangle(x0: f64, y0: f64, w: f64, h: f64) -> Polygon<f64> {
    polygon![
        (x: x0, y: y0),
        (x: x0 + w, y: y0),
        (x: x0 + w, y: y0 + h),
        (x: x0, y: y0 + h),
        (x: x0, y: y0)
    ]
}

fn triangle(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Polygon<f64> {
    polygon![
        (x: a.0, y: a.1),
        (x: b.0, y: b.1),
        (x: c.0, y: c.1),
        (x: a.0, y: a.1)
    ]
}

fn coordinate() -> impl Strategy<Value = (f64, f64)> {
    (-170.0f64..170.0, -80.0f64..80.0)
}

fn region() -> impl Strategy<Value = RegionGeometry> {
    prop_oneof![
        (coordinate(), 0.01f64..10.0, 0.01f64..10.0)
            .prop_map(|((x, y), w, h)| RegionGeometry::Polygon(rectangle(x, y, w, h))),
        (coordinate(), coordinate(), coordinate())
            .prop_map(|(a, b, c)| RegionGeometry::Polygon(triangle(a, b, c))),
        prop::collection::vec((coordinate(), 0.01f64..5.0, 0.01f64..5.0), 2..5).prop_map(|parts| {
            RegionGeometry::MultiPolygon(MultiPolygon::new(
                parts.into_iter().map(|((x, y), w, h)| rectangle(x, y, w, h)).collect(),
            ))
        }),
    ]
}

fn records() -> impl Strategy<Value = Vec<AssetRecord>> {
    prop::collection::vec(coordinate(), 0..40).prop_map(|points| {
        points
            .into_iter()
            .enumerate()
            .map(|(i, (lon, lat))| AssetRecord::new(lat, lon, "assets.csv", format!("I.{}", i)))
            .collect()
    })
}

proptest! {
    /// Property: the padded box encloses the unpadded envelope for any padding >= 0.
    #[test]
    fn prop_padded_box_encloses_envelope(
        geometry in region(),
        lat_pad in 0.0f64..5.0,
        lon_pad in 0.0f64..5.0,
    ) {
        let unpadded = envelope(&geometry).unwrap();
        let padded = from_geometry(&geometry, Padding::new(lat_pad, lon_pad).unwrap()).unwrap();
        prop_assert!(padded.encloses(&unpadded));
    }

    /// Property: zero padding gives back exactly the envelope.
    #[test]
    fn prop_zero_padding_is_envelope(geometry in region()) {
        let unpadded = envelope(&geometry).unwrap();
        let bbox = from_geometry(&geometry, Padding::none()).unwrap();
        prop_assert_eq!(bbox, unpadded);
    }

    /// Property: every vertex of every part lies inside the envelope.
    #[test]
    fn prop_envelope_covers_vertices(geometry in region()) {
        let bbox = envelope(&geometry).unwrap();
        for part in geometry.parts() {
            for c in part.exterior().coords() {
                prop_assert!(bbox.contains(c.y, c.x));
            }
        }
    }

    /// Property: the filtered set is a subset of the input and every kept point is inside.
    #[test]
    fn prop_filter_is_subset_and_inside(geometry in region(), input in records()) {
        let kept = filter_contained(input.clone(), &geometry);
        prop_assert!(kept.len() <= input.len());
        for record in &kept {
            prop_assert!(input.contains(record));
            prop_assert!(point_in_geometry(&record.point(), &geometry));
        }
    }

    /// Property: every contained point also lies inside the envelope,
    /// so the bounding box scan never loses a contained record.
    #[test]
    fn prop_contained_points_are_in_envelope(geometry in region(), input in records()) {
        let bbox = envelope(&geometry).unwrap();
        for record in filter_contained(input, &geometry) {
            prop_assert!(bbox.contains(record.lat, record.lon));
        }
    }

    /// Property: partition splits the input without losing records.
    #[test]
    fn prop_partition_is_complete(geometry in region(), input in records()) {
        let total = input.len();
        let (inside, outside) = partition_contained(input, &geometry);
        prop_assert_eq!(inside.len() + outside.len(), total);
        prop_assert!(outside.iter().all(|r| !point_in_geometry(&r.point(), &geometry)));
    }
}
