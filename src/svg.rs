//! Parsing and rasterising the town SVG.
//!
//! Clickable regions are the elements whose `id` is `zone:<Zone Identifier>`,
//! e.g. `<g id="zone:City Park">…</g>`. A point hits a zone when it falls
//! inside one of the zone's painted outlines. Zones made only of images or
//! text fall back to their absolute bounding box.

use resvg::tiny_skia;
use resvg::usvg::{self, Node};
use thiserror::Error;

/// Prefix marking an SVG element as a clickable zone.
pub const ZONE_ID_PREFIX: &str = "zone:";

/// Errors that can occur when loading the map image.
#[derive(Error, Debug)]
pub enum SvgError {
    #[error("failed to parse SVG: {0}")]
    Parse(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} canvas (empty or too large)")]
    InvalidCanvas { width: u32, height: u32 },
}

/// Axis-aligned rectangle in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// A path flattened to closed polygons in absolute SVG coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    contours: Vec<Vec<(f32, f32)>>,
    even_odd: bool,
}

impl Outline {
    const CURVE_STEPS: usize = 8;

    fn from_path(path: &usvg::Path) -> Self {
        let transform = path.abs_transform();
        let map = |point: tiny_skia::Point| {
            let mut point = point;
            transform.map_point(&mut point);
            (point.x, point.y)
        };

        let mut contours = Vec::new();
        let mut current: Vec<(f32, f32)> = Vec::new();
        let mut last = tiny_skia::Point::zero();
        for segment in path.data().segments() {
            match segment {
                tiny_skia::PathSegment::MoveTo(p) => {
                    if current.len() > 2 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(map(p));
                    last = p;
                }
                tiny_skia::PathSegment::LineTo(p) => {
                    current.push(map(p));
                    last = p;
                }
                tiny_skia::PathSegment::QuadTo(c, p) => {
                    for step in 1..=Self::CURVE_STEPS {
                        let t = step as f32 / Self::CURVE_STEPS as f32;
                        let u = 1.0 - t;
                        current.push(map(tiny_skia::Point::from_xy(
                            u * u * last.x + 2.0 * u * t * c.x + t * t * p.x,
                            u * u * last.y + 2.0 * u * t * c.y + t * t * p.y,
                        )));
                    }
                    last = p;
                }
                tiny_skia::PathSegment::CubicTo(c1, c2, p) => {
                    for step in 1..=Self::CURVE_STEPS {
                        let t = step as f32 / Self::CURVE_STEPS as f32;
                        let u = 1.0 - t;
                        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
                        current.push(map(tiny_skia::Point::from_xy(
                            a * last.x + b * c1.x + c * c2.x + d * p.x,
                            a * last.y + b * c1.y + c * c2.y + d * p.y,
                        )));
                    }
                    last = p;
                }
                tiny_skia::PathSegment::Close => {
                    if current.len() > 2 {
                        contours.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }
        if current.len() > 2 {
            contours.push(current);
        }

        let even_odd = path
            .fill()
            .is_some_and(|fill| fill.rule() == usvg::FillRule::EvenOdd);
        Self { contours, even_odd }
    }

    /// Winding-number test honouring the path's fill rule.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let mut winding = 0i32;
        for contour in &self.contours {
            for (i, &(x0, y0)) in contour.iter().enumerate() {
                let (x1, y1) = contour[(i + 1) % contour.len()];
                let side = (x1 - x0) * (y - y0) - (x - x0) * (y1 - y0);
                if y0 <= y {
                    if y1 > y && side > 0.0 {
                        winding += 1;
                    }
                } else if y1 <= y && side < 0.0 {
                    winding -= 1;
                }
            }
        }
        if self.even_odd {
            winding % 2 != 0
        } else {
            winding != 0
        }
    }
}

/// A clickable named region of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRegion {
    pub id: String,
    pub bounds: Bounds,
    /// Painted shapes of the zone. Empty when it has no paths.
    pub outlines: Vec<Outline>,
}

impl ZoneRegion {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
            && (self.outlines.is_empty() || self.outlines.iter().any(|o| o.contains(x, y)))
    }
}

/// RGBA8 pixels with premultiplied alpha, ready for texture upload.
pub struct RasterImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    /// Converts the pixels to straight alpha, as window icons expect.
    pub fn unmultiplied(mut self) -> Self {
        for pixel in self.pixels.chunks_exact_mut(4) {
            let alpha = u16::from(pixel[3]);
            if alpha == 0 || alpha == 255 {
                continue;
            }
            for channel in &mut pixel[..3] {
                let value = (u16::from(*channel) * 255 + alpha / 2) / alpha;
                *channel = value.min(255) as u8;
            }
        }
        self
    }
}

/// A parsed map image together with its zone regions.
pub struct TownSvg {
    tree: usvg::Tree,
    regions: Vec<ZoneRegion>,
}

impl TownSvg {
    pub fn parse(data: &[u8]) -> Result<Self, SvgError> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())?;
        let mut regions = Vec::new();
        collect_regions(tree.root(), &mut regions);
        Ok(Self { tree, regions })
    }

    /// Intrinsic size of the image in SVG user units.
    pub fn size(&self) -> [f32; 2] {
        let size = self.tree.size();
        [size.width(), size.height()]
    }

    /// Regions in paint order (later entries are drawn on top).
    pub fn regions(&self) -> &[ZoneRegion] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<ZoneRegion> {
        self.regions
    }

    /// Returns the topmost region containing the point, if any.
    pub fn zone_at(&self, x: f32, y: f32) -> Option<&ZoneRegion> {
        zone_at(&self.regions, x, y)
    }

    /// Renders the whole image at `scale` times its intrinsic size.
    pub fn rasterize(&self, scale: f32) -> Result<RasterImage, SvgError> {
        let [width, height] = self.size();
        let width = (width * scale).ceil() as u32;
        let height = (height * scale).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(SvgError::InvalidCanvas { width, height })?;
        resvg::render(
            &self.tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        Ok(RasterImage {
            pixels: pixmap.take(),
            width,
            height,
        })
    }
}

/// Returns the topmost region in `regions` containing the point.
pub fn zone_at(regions: &[ZoneRegion], x: f32, y: f32) -> Option<&ZoneRegion> {
    regions.iter().rev().find(|region| region.contains(x, y))
}

fn collect_regions(group: &usvg::Group, regions: &mut Vec<ZoneRegion>) {
    for node in group.children() {
        if let Some(id) = node.id().strip_prefix(ZONE_ID_PREFIX) {
            let rect = node.abs_bounding_box();
            let mut outlines = Vec::new();
            collect_outlines(node, &mut outlines);
            regions.push(ZoneRegion {
                id: id.to_owned(),
                bounds: Bounds {
                    min_x: rect.left(),
                    min_y: rect.top(),
                    max_x: rect.right(),
                    max_y: rect.bottom(),
                },
                outlines,
            });
            continue;
        }

        if let Node::Group(child) = node {
            collect_regions(child, regions);
        }
    }
}

fn collect_outlines(node: &Node, outlines: &mut Vec<Outline>) {
    match node {
        Node::Path(path) => outlines.push(Outline::from_path(path)),
        Node::Group(group) => {
            for child in group.children() {
                collect_outlines(child, outlines);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <rect id="background" x="0" y="0" width="200" height="100" fill="#cde"/>
  <g id="zone:City Park"><rect x="10" y="10" width="50" height="40" fill="#4a4"/></g>
  <rect id="zone:House 1" x="40" y="20" width="20" height="20" fill="#a44"/>
  <g id="decor">
    <g id="zone:Community Well" transform="translate(100 0)">
      <rect x="10" y="10" width="20" height="20" fill="#44a"/>
    </g>
  </g>
</svg>"##;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn test_regions_are_collected_in_paint_order() {
        let svg = TownSvg::parse(SAMPLE.as_bytes()).unwrap();
        let ids: Vec<_> = svg.regions().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["City Park", "House 1", "Community Well"]);
    }

    #[test]
    fn test_region_bounds_are_absolute() {
        let svg = TownSvg::parse(SAMPLE.as_bytes()).unwrap();
        let well = svg
            .regions()
            .iter()
            .find(|r| r.id == "Community Well")
            .unwrap();
        assert!(approx(well.bounds.min_x, 110.0), "{:?}", well.bounds);
        assert!(approx(well.bounds.min_y, 10.0), "{:?}", well.bounds);
        assert!(approx(well.bounds.max_x, 130.0), "{:?}", well.bounds);
        assert!(approx(well.bounds.max_y, 30.0), "{:?}", well.bounds);
    }

    #[test]
    fn test_hit_test_prefers_topmost_region() {
        let svg = TownSvg::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(svg.zone_at(45.0, 25.0).map(|r| r.id.as_str()), Some("House 1"));
        assert_eq!(svg.zone_at(15.0, 15.0).map(|r| r.id.as_str()), Some("City Park"));
        assert_eq!(svg.zone_at(180.0, 90.0), None);
    }

    #[test]
    fn test_size_and_raster_dimensions() {
        let svg = TownSvg::parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(svg.size(), [200.0, 100.0]);

        let raster = svg.rasterize(2.0).unwrap();
        assert_eq!((raster.width, raster.height), (400, 200));
        assert_eq!(raster.pixels.len(), 400 * 200 * 4);
        // Background is opaque everywhere.
        assert_eq!(raster.pixels[3], 255);
    }

    #[test]
    fn test_hit_test_follows_painted_shape() {
        let svg = TownSvg::parse(
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect id="zone:Meadow" x="0" y="0" width="100" height="100" fill="#6a6"/>
  <path id="zone:Pond" d="M 0 0 L 100 0 L 0 100 Z" fill="#46c"/>
  <path id="zone:Island" fill-rule="evenodd" fill="#ca6"
        d="M 60 60 L 90 60 L 90 90 L 60 90 Z M 70 70 L 80 70 L 80 80 L 70 80 Z"/>
</svg>"##,
        )
        .unwrap();

        // Inside the triangle.
        assert_eq!(svg.zone_at(10.0, 10.0).map(|r| r.id.as_str()), Some("Pond"));
        // Inside the triangle's bounding box but past its hypotenuse.
        assert_eq!(svg.zone_at(55.0, 50.0).map(|r| r.id.as_str()), Some("Meadow"));
        // Ring is hit, the even-odd hole is not.
        assert_eq!(svg.zone_at(65.0, 65.0).map(|r| r.id.as_str()), Some("Island"));
        assert_eq!(svg.zone_at(75.0, 75.0).map(|r| r.id.as_str()), Some("Meadow"));
    }

    #[test]
    fn test_curved_outline_excludes_corners() {
        let svg = TownSvg::parse(
            br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <circle id="zone:Community Well" cx="50" cy="50" r="40" fill="#44a"/>
</svg>"##,
        )
        .unwrap();
        assert!(svg.zone_at(50.0, 50.0).is_some());
        assert!(svg.zone_at(85.0, 50.0).is_some());
        assert_eq!(svg.zone_at(15.0, 15.0), None);
    }

    #[test]
    fn test_unallocatable_canvas_is_an_error() {
        let svg = TownSvg::parse(SAMPLE.as_bytes()).unwrap();
        assert!(matches!(
            svg.rasterize(0.0),
            Err(SvgError::InvalidCanvas { width: 0, height: 0 })
        ));
        let err = svg.rasterize(1.0e7).err().unwrap();
        assert!(matches!(err, SvgError::InvalidCanvas { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_unmultiplied_restores_straight_alpha() {
        let raster = RasterImage {
            pixels: vec![64, 32, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0],
            width: 3,
            height: 1,
        }
        .unmultiplied();
        assert_eq!(raster.pixels, vec![128, 64, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_svg_is_an_error() {
        assert!(matches!(
            TownSvg::parse(b"<not-svg"),
            Err(SvgError::Parse(_))
        ));
    }

    #[test]
    fn test_bounds_helpers() {
        let bounds = Bounds {
            min_x: 10.0,
            min_y: 20.0,
            max_x: 30.0,
            max_y: 60.0,
        };
        assert_eq!(bounds.center(), (20.0, 40.0));
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 40.0);
        assert!(bounds.contains(10.0, 60.0));
        assert!(!bounds.contains(9.9, 30.0));
    }
}
