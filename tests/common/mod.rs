#![allow(dead_code)]

use std::collections::HashMap;
use veneer::{
    parse_document, Bounds, ContentProvider, ContentSource, ElementBox, Error, FixedMeasure,
    ParseCx, Point, Registry,
};

/// Text measures 10px per char on a 20px line; image sources named like
/// `80x50` report that size immediately, anything else stays pending.
pub struct TestContent;

pub struct Pending;

impl ContentSource for Pending {
    fn natural_size(&self) -> Option<Point> {
        None
    }
}

impl ContentProvider for TestContent {
    fn text(&self, text: &str) -> Box<dyn ContentSource> {
        Box::new(FixedMeasure(Point::new(
            text.chars().count() as f64 * 10.0,
            20.0,
        )))
    }

    fn image(&self, path: &str) -> Result<Box<dyn ContentSource>, Error> {
        let parsed = path
            .split_once('x')
            .and_then(|(w, h)| Some(Point::new(w.parse().ok()?, h.parse().ok()?)));
        Ok(match parsed {
            Some(size) => Box::new(FixedMeasure(size)),
            None => Box::new(Pending),
        })
    }
}

pub fn bounds(width: f64, height: f64) -> Bounds {
    Bounds::new(Point::new(0.0, 0.0), Point::new(width, height))
}

pub fn parse_with(
    registry: &Registry,
    docs: &HashMap<String, String>,
    xml: &str,
) -> Result<ElementBox, Error> {
    let content = TestContent;
    let mut cx = ParseCx::new(registry, docs, &content);
    parse_document(&mut cx, xml.as_bytes())
}

pub fn parse(xml: &str) -> Result<ElementBox, Error> {
    let registry = Registry::with_builtins();
    let docs = HashMap::new();
    parse_with(&registry, &docs, xml)
}
