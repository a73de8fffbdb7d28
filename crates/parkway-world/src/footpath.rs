//! Footpath topology around ride entrances and exits.
//!
//! An entrance or exit facing direction `d` joins the footpath on the tile
//! one step in `d`, at the same height. Queue lines reachable from an
//! entrance are chained to its ride and station. The maze track an entrance
//! serves sits one step behind it, in `d.reverse()`.

use std::collections::{BTreeSet, VecDeque};

use parkway_types::{Direction, RideId, StationIndex, TileCoords};

use crate::element::TileElement;
use crate::tile_map::TileMap;

/// A queue line waiting to be chained to a ride station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueueChainStart {
    /// The first queue tile, adjoining the entrance.
    pub tile: TileCoords,
    /// Height of the queue.
    pub z: i32,
    /// Ride the queue leads to.
    pub ride: RideId,
    /// Station the queue leads to.
    pub station: StationIndex,
}

fn path_index_at(map: &TileMap, tile: TileCoords, z: i32) -> Option<usize> {
    map.tile(tile)?
        .elements
        .iter()
        .position(|e| e.base_z == z && e.as_path().is_some())
}

/// Join the element at `tile`/`index` to the footpath it faces.
///
/// Returns the queue chain to start when the element is an entrance facing a
/// queue line.
pub fn connect_edges(map: &mut TileMap, tile: TileCoords, index: usize) -> Option<QueueChainStart> {
    let element = map.tile(tile)?.elements.get(index)?;
    let direction = element.direction;
    let z = element.base_z;
    let entrance = element.as_entrance().copied();

    let neighbour = tile.neighbour(direction)?;
    let path_index = path_index_at(map, neighbour, z)?;
    let path = map
        .tile_mut(neighbour)?
        .elements
        .get_mut(path_index)?
        .as_path_mut()?;
    path.edges |= direction.reverse().edge_bit();

    let entrance = entrance?;
    if !path.is_queue || entrance.entrance_type.is_exit() {
        return None;
    }
    Some(QueueChainStart {
        tile: neighbour,
        z,
        ride: entrance.ride,
        station: entrance.station,
    })
}

/// Detach the footpath the element at `tile`/`index` faces, and unchain the
/// queue that led to it.
pub fn remove_edges(map: &mut TileMap, tile: TileCoords, index: usize) {
    let Some(element) = map.tile(tile).and_then(|t| t.elements.get(index)) else {
        return;
    };
    let direction = element.direction;
    let z = element.base_z;
    let entrance = element.as_entrance().copied();

    let Some(neighbour) = tile.neighbour(direction) else {
        return;
    };
    let Some(path_index) = path_index_at(map, neighbour, z) else {
        return;
    };
    if let Some(path) = map
        .tile_mut(neighbour)
        .and_then(|t| t.elements.get_mut(path_index))
        .and_then(TileElement::as_path_mut)
    {
        path.edges &= !direction.reverse().edge_bit();
    }

    if let Some(entrance) = entrance {
        let owner = (entrance.ride, entrance.station);
        for (queue_tile, queue_index) in queue_line(map, neighbour, z) {
            if let Some(path) = map
                .tile_mut(queue_tile)
                .and_then(|t| t.elements.get_mut(queue_index))
                .and_then(TileElement::as_path_mut)
                && path.queue_for == Some(owner)
            {
                path.queue_for = None;
            }
        }
    }
}

/// Chain every pending queue line to its ride station, consuming the list.
pub fn update_queue_chains(map: &mut TileMap, pending: &mut Vec<QueueChainStart>) {
    for start in pending.drain(..) {
        for (tile, index) in queue_line(map, start.tile, start.z) {
            if let Some(path) = map
                .tile_mut(tile)
                .and_then(|t| t.elements.get_mut(index))
                .and_then(TileElement::as_path_mut)
            {
                path.queue_for = Some((start.ride, start.station));
            }
        }
    }
}

/// Every queue tile connected to the queue at `start`/`z`, breadth first.
fn queue_line(map: &TileMap, start: TileCoords, z: i32) -> Vec<(TileCoords, usize)> {
    let mut found = Vec::new();
    let mut seen = BTreeSet::new();
    let mut frontier = VecDeque::from([start]);
    while let Some(tile) = frontier.pop_front() {
        if !seen.insert(tile) {
            continue;
        }
        let Some(index) = path_index_at(map, tile, z) else {
            continue;
        };
        let Some(path) = map
            .tile(tile)
            .and_then(|t| t.elements.get(index))
            .and_then(TileElement::as_path)
        else {
            continue;
        };
        if !path.is_queue {
            continue;
        }
        found.push((tile, index));
        for direction in Direction::ALL {
            if path.edges & direction.edge_bit() != 0
                && let Some(next) = tile.neighbour(direction)
            {
                frontier.push_back(next);
            }
        }
    }
    found
}

/// Set or clear the maze hedge behind the entrance at `tile`/`index`.
///
/// Only track belonging to the entrance's own ride is touched; callers decide
/// whether the ride is a maze.
pub fn set_maze_hedge(map: &mut TileMap, tile: TileCoords, index: usize, standing: bool) {
    let Some(element) = map.tile(tile).and_then(|t| t.elements.get(index)) else {
        return;
    };
    let Some(entrance) = element.as_entrance().copied() else {
        return;
    };
    let direction = element.direction;
    let z = element.base_z;
    let Some(behind) = tile.neighbour(direction.reverse()) else {
        return;
    };
    let Some(t) = map.tile_mut(behind) else {
        return;
    };
    for element in t.elements.iter_mut().filter(|e| e.base_z == z) {
        if let Some(track) = element.as_track_mut()
            && track.ride == entrance.ride
        {
            if standing {
                track.hedges |= direction.edge_bit();
            } else {
                track.hedges &= !direction.edge_bit();
            }
        }
    }
}
