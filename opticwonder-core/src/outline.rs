//! Object silhouettes supplied by the object picker.
//!
//! Each outline is an ordered list of `{X, Y}` points in a local frame.
//! Either coordinate may be `null`; a point with a missing coordinate breaks
//! the polyline, and points with a missing `Y` are ignored when measuring
//! the outline's height.

use crate::error::OpticsError;
use crate::points::Point2D;
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../data/objects.json");

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutlinePoint {
    #[serde(rename = "X")]
    pub x: Option<f64>,
    #[serde(rename = "Y")]
    pub y: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectOutline {
    pub name: String,
    pub coords: Vec<OutlinePoint>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutlineCatalog {
    outlines: Vec<ObjectOutline>,
}

impl OutlinePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    /// Stroke separator.
    pub fn gap() -> Self {
        Self { x: None, y: None }
    }

    fn defined(&self) -> Option<Point2D> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(Point2D::new(x, y)),
            _ => None,
        }
    }
}

impl ObjectOutline {
    pub fn new(name: impl Into<String>, coords: Vec<OutlinePoint>) -> Self {
        Self {
            name: name.into(),
            coords,
        }
    }

    /// `(min_y, max_y)` over the points that have a defined `Y`.
    pub fn height_range(&self) -> Result<(f64, f64), OpticsError> {
        let mut ys = self.coords.iter().filter_map(|c| c.y);
        let first = ys.next().ok_or_else(|| OpticsError::EmptyOutline {
            name: self.name.clone(),
        })?;
        Ok(ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Height of the outline once its lowest point sits on the axis.
    pub fn height(&self) -> Result<f64, OpticsError> {
        let (min_y, max_y) = self.height_range()?;
        Ok(max_y - min_y)
    }

    /// Polyline runs with the minimum y normalized to 0.
    ///
    /// Runs are split at every point with a missing coordinate; runs with a
    /// single point are dropped since they have no segment to draw.
    pub fn strokes(&self) -> Result<Vec<Vec<Point2D>>, OpticsError> {
        let (min_y, _) = self.height_range()?;
        let mut strokes = Vec::new();
        let mut current: Vec<Point2D> = Vec::new();

        for coord in &self.coords {
            match coord.defined() {
                Some(p) => current.push(Point2D::new(p.x, p.y - min_y)),
                None => {
                    if current.len() > 1 {
                        strokes.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() > 1 {
            strokes.push(current);
        }

        Ok(strokes)
    }
}

impl OutlineCatalog {
    pub fn new(outlines: Vec<ObjectOutline>) -> Self {
        Self { outlines }
    }

    /// Parse a catalog from the picker's JSON format.
    pub fn from_json(json: &str) -> Result<Self, OpticsError> {
        let outlines: Vec<ObjectOutline> =
            serde_json::from_str(json).map_err(OpticsError::Catalog)?;
        Ok(Self { outlines })
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("Invalid builtin outline catalog")
    }

    pub fn get(&self, name: &str) -> Result<&ObjectOutline, OpticsError> {
        self.outlines
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| OpticsError::UnknownObject(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.outlines.iter().any(|o| o.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outlines.iter().map(|o| o.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }
}

/// Title-case an object name for display (`spider-man` -> `Spider-man`).
pub fn display_name(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = OutlineCatalog::builtin();
        assert!(!catalog.is_empty());
        for name in ["triangle", "arrow", "candle", "frog", "spider-man"] {
            assert!(catalog.contains(name), "missing {name}");
        }
    }

    #[test]
    fn every_builtin_outline_has_height_and_strokes() {
        let catalog = OutlineCatalog::builtin();
        for name in catalog.names() {
            let outline = catalog.get(name).unwrap();
            assert!(outline.height().unwrap() > 0.0, "{name} has no height");
            assert!(!outline.strokes().unwrap().is_empty(), "{name} has no strokes");
        }
    }

    #[test]
    fn height_ignores_null_y() {
        let outline = ObjectOutline::new(
            "test",
            vec![
                OutlinePoint::new(0.0, 10.0),
                OutlinePoint { x: Some(1.0), y: None },
                OutlinePoint::new(0.0, 50.0),
            ],
        );
        assert_eq!(outline.height_range().unwrap(), (10.0, 50.0));
        assert_eq!(outline.height().unwrap(), 40.0);
    }

    #[test]
    fn point_with_only_y_still_counts_for_height() {
        let outline = ObjectOutline::new(
            "test",
            vec![
                OutlinePoint::new(0.0, 0.0),
                OutlinePoint { x: None, y: Some(70.0) },
                OutlinePoint::new(0.0, 20.0),
            ],
        );
        assert_eq!(outline.height().unwrap(), 70.0);
    }

    #[test]
    fn empty_outline_is_an_error() {
        let outline = ObjectOutline::new("ghost", vec![OutlinePoint::gap(), OutlinePoint::gap()]);
        match outline.height_range() {
            Err(OpticsError::EmptyOutline { name }) => assert_eq!(name, "ghost"),
            other => panic!("expected EmptyOutline, got {other:?}"),
        }
        assert!(outline.strokes().is_err());
    }

    #[test]
    fn strokes_split_at_gaps_and_normalize_min_y() {
        let outline = ObjectOutline::new(
            "test",
            vec![
                OutlinePoint::new(0.0, -5.0),
                OutlinePoint::new(0.0, 15.0),
                OutlinePoint::gap(),
                OutlinePoint::new(3.0, 0.0),
                OutlinePoint::gap(),
                OutlinePoint::new(-1.0, 5.0),
                OutlinePoint::new(1.0, 5.0),
            ],
        );
        let strokes = outline.strokes().unwrap();
        assert_eq!(
            strokes,
            vec![
                vec![Point2D::new(0.0, 0.0), Point2D::new(0.0, 20.0)],
                vec![Point2D::new(-1.0, 10.0), Point2D::new(1.0, 10.0)],
            ]
        );
    }

    #[test]
    fn unknown_object_lookup_fails() {
        let catalog = OutlineCatalog::builtin();
        assert!(matches!(
            catalog.get("teapot"),
            Err(OpticsError::UnknownObject(name)) if name == "teapot"
        ));
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        assert!(matches!(
            OutlineCatalog::from_json("{\"name\": 1}"),
            Err(OpticsError::Catalog(_))
        ));
    }

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("spider-man"), "Spider-man");
        assert_eq!(display_name("triangle"), "Triangle");
        assert_eq!(display_name("red CANDLE"), "Red Candle");
    }
}
