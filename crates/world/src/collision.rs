//! Collision Detector: pure geometric crossing detection.
//!
//! No knowledge of dogs, loot, or offices lives here — just gatherers
//! (moving segments with a radius) and items (stationary points with a
//! radius), producing a deterministically ordered list of gather events.

use crate::geometry::RealPoint;

#[derive(Debug, Clone, Copy)]
pub struct Gatherer {
    pub start: RealPoint,
    pub end: RealPoint,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub pos: RealPoint,
    pub radius: f64,
}

/// One gatherer crossing one item's collection radius during its tick
/// movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatherEvent {
    pub item_id: usize,
    pub gatherer_id: usize,
    pub sq_distance: f64,
    /// Fraction of the gatherer's movement segment at which the crossing
    /// occurs, in `[0, 1]`.
    pub time: f64,
}

fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

fn sub(a: RealPoint, b: RealPoint) -> (f64, f64) {
    (a.x - b.x, a.y - b.y)
}

/// Finds every (gatherer, item) crossing, sorted by `(time, gatherer_id,
/// item_id)`. Gatherers with zero displacement (`start == end`) are
/// skipped entirely — this is an expected no-op, not an error, since the
/// projection ratio would otherwise divide by zero.
pub fn find_gather_events(gatherers: &[Gatherer], items: &[Item]) -> Vec<GatherEvent> {
    let mut events = Vec::new();
    for (gatherer_id, gatherer) in gatherers.iter().enumerate() {
        if gatherer.start.x == gatherer.end.x && gatherer.start.y == gatherer.end.y {
            continue;
        }
        let v = sub(gatherer.end, gatherer.start);
        let v_len2 = dot(v, v);
        for (item_id, item) in items.iter().enumerate() {
            let u = sub(item.pos, gatherer.start);
            let u_dot_v = dot(u, v);
            let u_len2 = dot(u, u);
            let proj_ratio = u_dot_v / v_len2;
            let sq_distance = u_len2 - (u_dot_v * u_dot_v) / v_len2;
            let collect_radius = gatherer.radius + item.radius;
            if sq_distance <= collect_radius * collect_radius
                && (0.0..=1.0).contains(&proj_ratio)
            {
                events.push(GatherEvent {
                    item_id,
                    gatherer_id,
                    sq_distance,
                    time: proj_ratio,
                });
            }
        }
    }
    events.sort_by(|a, b| {
        a.time
            .partial_cmp(&b.time)
            .unwrap()
            .then(a.gatherer_id.cmp(&b.gatherer_id))
            .then(a.item_id.cmp(&b.item_id))
    });
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> RealPoint {
        RealPoint::new(x, y)
    }

    #[test]
    fn empty_provider_yields_no_events() {
        assert!(find_gather_events(&[], &[]).is_empty());
    }

    #[test]
    fn stationary_gatherer_yields_no_events() {
        let gatherers = [Gatherer {
            start: pt(0.0, 0.0),
            end: pt(0.0, 0.0),
            radius: 1.0,
        }];
        let items = [Item {
            pos: pt(0.0, 0.0),
            radius: 1.0,
        }];
        assert!(find_gather_events(&gatherers, &items).is_empty());
    }

    #[test]
    fn linear_collision_with_offset() {
        let gatherers = [Gatherer {
            start: pt(0.0, 0.0),
            end: pt(10.0, 0.0),
            radius: 0.5,
        }];
        let items = [
            Item { pos: pt(2.0, 0.0), radius: 0.1 },
            Item { pos: pt(5.0, 0.3), radius: 0.1 },
            Item { pos: pt(5.0, 2.0), radius: 0.1 },
            Item { pos: pt(-1.0, 0.0), radius: 0.1 },
        ];
        let events = find_gather_events(&gatherers, &items);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].item_id, 0);
        assert!((events[0].time - 0.2).abs() < 1e-9);
        assert!((events[0].sq_distance - 0.0).abs() < 1e-9);
        assert_eq!(events[1].item_id, 1);
        assert!((events[1].time - 0.5).abs() < 1e-9);
        assert!((events[1].sq_distance - 0.09).abs() < 1e-9);
    }

    #[test]
    fn chronological_sort_with_tie_break() {
        let gatherers = [Gatherer {
            start: pt(0.0, 0.0),
            end: pt(10.0, 0.0),
            radius: 0.0,
        }];
        let items = [
            Item { pos: pt(8.0, 0.0), radius: 0.0 },
            Item { pos: pt(2.0, 0.0), radius: 0.0 },
        ];
        let events = find_gather_events(&gatherers, &items);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].item_id, 1);
        assert!((events[0].time - 0.2).abs() < 1e-9);
        assert_eq!(events[1].item_id, 0);
        assert!((events[1].time - 0.8).abs() < 1e-9);
    }
}
