use waygrid_core::{Aabb, Polygon, Vec2};

/// Source of polygonal obstacles for the grid builder.
pub trait ObstacleSource {
    /// Append every obstacle that may lie within `radius` of `center` into
    /// `buf`. The caller clears `buf` before calling. Reporting extra,
    /// distant obstacles is allowed; missing a close one is not.
    fn obstacles_near<'a>(&'a self, center: Vec2, radius: f64, buf: &mut Vec<&'a Polygon>);
}

impl ObstacleSource for [Polygon] {
    fn obstacles_near<'a>(&'a self, center: Vec2, radius: f64, buf: &mut Vec<&'a Polygon>) {
        let query = Aabb::around(center, radius);
        buf.extend(self.iter().filter(|p| p.aabb().overlaps(&query)));
    }
}

impl ObstacleSource for Vec<Polygon> {
    #[inline]
    fn obstacles_near<'a>(&'a self, center: Vec2, radius: f64, buf: &mut Vec<&'a Polygon>) {
        self.as_slice().obstacles_near(center, radius, buf);
    }
}
