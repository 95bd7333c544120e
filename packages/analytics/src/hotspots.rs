//! Location visit frequency.

use vehicle_trace_analytics_models::{Hotspot, TimelineEntry};

/// Ranks the locations in one vehicle's timeline by visit count.
///
/// Ties keep the order in which the locations were first visited. At most
/// `limit` locations are returned; each carries its visits in time order.
#[must_use]
pub fn rank_hotspots(entries: &[TimelineEntry], limit: usize) -> Vec<Hotspot> {
    let mut hotspots: Vec<Hotspot> = Vec::new();

    for entry in entries {
        if let Some(hotspot) = hotspots.iter_mut().find(|h| h.location == entry.location) {
            hotspot.count += 1;
            hotspot.visits.push(entry.clone());
        } else {
            hotspots.push(Hotspot {
                rank: 0,
                location: entry.location.clone(),
                count: 1,
                visits: vec![entry.clone()],
            });
        }
    }

    hotspots.sort_by(|a, b| b.count.cmp(&a.count));
    hotspots.truncate(limit);

    for (idx, hotspot) in hotspots.iter_mut().enumerate() {
        hotspot.rank = idx + 1;
    }

    hotspots
}
