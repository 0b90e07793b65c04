//! Airborne early warning: slow, unarmed, wide radar.

use super::{Destination, Piece};

/// Hold course, one step forward, or turn in place.
pub(super) fn candidates(piece: &Piece) -> [Destination; 4] {
    let p = piece.position;
    let d = piece.direction;
    [
        Destination::new(p, d),
        Destination::new(p.add(d.delta()), d),
        Destination::new(p, d.left()),
        Destination::new(p, d.right()),
    ]
}
