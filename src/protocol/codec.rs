//! Binary wire codec.
//!
//! `bincode` encoding of [`WireEvent`] and [`WireResponse`] lists. The
//! hot-seat link can push every exchange through here so that local play
//! exercises exactly what a transport would carry.

use crate::core::Result;

use super::{WireEvent, WireResponse};

pub fn encode_event(event: &WireEvent) -> Result<Vec<u8>> {
    Ok(bincode::serialize(event)?)
}

pub fn decode_event(bytes: &[u8]) -> Result<WireEvent> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn encode_responses(responses: &[WireResponse]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(responses)?)
}

pub fn decode_responses(bytes: &[u8]) -> Result<Vec<WireResponse>> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encode then decode, as a transport would.
pub fn roundtrip_event(event: &WireEvent) -> Result<WireEvent> {
    decode_event(&encode_event(event)?)
}

/// Encode then decode a response batch.
pub fn roundtrip_responses(responses: &[WireResponse]) -> Result<Vec<WireResponse>> {
    decode_responses(&encode_responses(responses)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RevealReason;
    use crate::core::{Direction, Player};
    use crate::pieces::PieceType;
    use crate::protocol::{SimplePiece, SimplePosition};

    #[test]
    fn test_reveal_with_aew_reason_survives() {
        let aew = SimplePiece {
            piece_type: PieceType::Aew,
            player: Player::Player1,
            direction: Direction::Up,
            position: SimplePosition { x: 5, y: 5 },
        };
        let event = WireEvent::Reveal {
            cells: vec![
                (SimplePosition { x: 5, y: 2 }, RevealReason::Aew(aew)),
                (SimplePosition { x: 0, y: 9 }, RevealReason::Territory),
            ],
        };
        assert_eq!(roundtrip_event(&event).unwrap(), event);
    }

    #[test]
    fn test_garbage_is_a_codec_error() {
        let err = decode_event(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, crate::core::GameError::Codec(_)));
    }

    #[test]
    fn test_empty_response_batch() {
        let bytes = encode_responses(&[]).unwrap();
        assert!(decode_responses(&bytes).unwrap().is_empty());
    }
}
