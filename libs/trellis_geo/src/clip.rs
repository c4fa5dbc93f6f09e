use geo::{Coord, Distance, Haversine, LineString, Point};

#[inline]
fn interpolate(from: Coord, to: Coord, fraction: f64) -> Coord {
    Coord {
        x: from.x + (to.x - from.x) * fraction,
        y: from.y + (to.y - from.y) * fraction,
    }
}

/// Great-circle length of a polyline, in metres.
pub fn line_length(line: &LineString) -> f64 {
    line.lines()
        .map(|segment| Haversine.distance(Point(segment.start), Point(segment.end)))
        .sum()
}

/// Clips the polyline to the part lying between the fractional offsets
/// `source` and `target` of its total length.
///
/// Returns an empty line when `source > target` or the input has fewer
/// than two points.
///
/// ```text
///  source = 0.25          target = 0.75
///      |                      |
/// o----x-------o-------o------x----o
///      [======= clip =========]
/// ```
pub fn clip_linestring(line: &LineString, source: f64, target: f64) -> LineString {
    if source > target || line.0.len() < 2 {
        return LineString::new(vec![]);
    }

    let total_length = line_length(line);

    let start_length = source * total_length;
    let end_length = target * total_length;

    let mut accumulated = 0.0;
    let mut clip: Vec<Coord> = vec![];

    for segment in line.lines() {
        let length = Haversine.distance(Point(segment.start), Point(segment.end));
        let fraction = |at: f64| {
            if length > 0.0 {
                ((at - accumulated) / length).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        if clip.is_empty() && start_length <= accumulated + length {
            clip.push(interpolate(segment.start, segment.end, fraction(start_length)));
        }

        if !clip.is_empty() {
            if end_length <= accumulated + length {
                clip.push(interpolate(segment.start, segment.end, fraction(end_length)));
                break;
            }

            clip.push(segment.end);
        }

        accumulated += length;
    }

    LineString::new(clip)
}
