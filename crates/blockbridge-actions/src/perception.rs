//! Local perception query.
//!
//! Builds a [`PerceptionReport`] from the session's current snapshot: the
//! non-empty voxels of the cube `[-radius, +radius]^3` around the avatar's
//! voxel, and every other entity within `radius`. Read-only, no waiting.
//!
//! The scan is a cube, not a sphere. Voxels are visited x-major, then y,
//! then z, each ascending; the block list keeps the first
//! `max_blocks` non-empty voxels in that order. The entity list is not
//! capped. Query cost grows with the cube of the radius, which callers
//! choose.

use blockbridge_types::{BlockOffset, BlockSample, EntitySample, EntityView, PerceptionReport, Vec3};
use blockbridge_world::WorldSession;

/// Scan the surroundings of the avatar.
pub fn look_around<S: WorldSession>(session: &S, radius: u32, max_blocks: usize) -> PerceptionReport {
    let origin = session.position();
    PerceptionReport {
        blocks: scan_blocks(session, origin, radius, max_blocks),
        entities: nearby_entities(session, origin, radius),
    }
}

/// Non-empty voxels around `origin`, in scan order, at most `max_blocks`.
///
/// Scanning stops once the cap is reached; voxels past it could never
/// appear in the report.
pub fn scan_blocks<S: WorldSession>(
    session: &S,
    origin: Vec3,
    radius: u32,
    max_blocks: usize,
) -> Vec<BlockSample> {
    let center = origin.floored();
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let mut blocks = Vec::new();
    if max_blocks == 0 {
        return blocks;
    }
    for x in -r..=r {
        for y in -r..=r {
            for z in -r..=r {
                let Some(block) = session.block_at(center.offset(x, y, z)) else {
                    continue;
                };
                if block.is_empty() {
                    continue;
                }
                blocks.push(BlockSample {
                    name: block.name,
                    position: BlockOffset { x, y, z },
                });
                if blocks.len() >= max_blocks {
                    return blocks;
                }
            }
        }
    }
    blocks
}

/// Every entity other than the avatar within `radius` of `origin`.
pub fn nearby_entities<S: WorldSession>(session: &S, origin: Vec3, radius: u32) -> Vec<EntitySample> {
    let self_id = session.self_id();
    let limit = f64::from(radius);
    session
        .entities()
        .into_iter()
        .filter(|entity| entity.id != self_id)
        .filter_map(|entity| {
            let distance = origin.distance_to(entity.position);
            (distance <= limit).then(|| sample(&entity, distance))
        })
        .collect()
}

fn sample(entity: &EntityView, distance: f64) -> EntitySample {
    EntitySample {
        name: String::from(entity.label()),
        kind: entity.kind,
        distance: round_to_hundredths(distance),
        position: entity.position,
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
