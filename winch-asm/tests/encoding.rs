use proptest::prelude::*;
use strum::IntoEnumIterator;

use winch_asm::{
    Builder, CodecError, Deserialize, Expression, Operation, Path, PathFlags, PathSegment,
    Serialize,
};

fn raw_expression() -> impl Strategy<Value = Expression> {
    (
        prop::collection::vec(any::<u8>(), 0..=64),
        prop::collection::vec(any::<u8>(), 0..=64),
        prop::collection::vec(any::<u32>(), 0..=96),
    )
        .prop_map(|(ops, ints, bits)| {
            // Literals from raw bit patterns, NaN payloads included; the
            // codec must not normalize them.
            let floats = bits.into_iter().map(f32::from_bits).collect();
            Expression::new(ops, ints, floats)
        })
}

fn float_bits(floats: &[f32]) -> Vec<u32> {
    floats.iter().map(|f| f.to_bits()).collect()
}

proptest! {
    #[test]
    fn expression_round_trips_bit_exactly(expr in raw_expression()) {
        let bytes = expr.to_bytes().unwrap();
        let decoded = Expression::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.ops(), expr.ops());
        prop_assert_eq!(decoded.ints(), expr.ints());
        prop_assert_eq!(float_bits(decoded.floats()), float_bits(expr.floats()));
    }

    #[test]
    fn expression_wire_length_is_padded(expr in raw_expression()) {
        let bytes = expr.to_bytes().unwrap();
        // The legacy pad is 1..=4 bytes: a full word when already aligned.
        let pad = 4 - (expr.ops().len() + expr.ints().len()) % 4;
        prop_assert_eq!(
            bytes.len(),
            4 + expr.ops().len() + expr.ints().len() + pad + 4 * expr.floats().len()
        );
    }

    #[test]
    fn path_round_trips(times in prop::collection::vec(any::<u32>(), 0..=8)) {
        let segments: Vec<PathSegment> = times
            .iter()
            .map(|&t| PathSegment::new(t, Builder::new().push(&[f64::from(t % 100)]).build()))
            .collect();
        let path = Path::new(segments);
        let decoded = Path::from_bytes(&path.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(decoded.segments(), path.segments());

        let wraps = !times.is_empty() && times[times.len() - 1] <= times[0];
        prop_assert_eq!(decoded.flags().contains(PathFlags::OVERFLOW), wraps);
    }
}

#[test]
fn every_operation_survives_an_expression_round_trip() {
    let ops: Vec<u8> = Operation::iter().map(u8::from).collect();
    let expr = Expression::new(ops, vec![1, 2, 3], vec![0.5, -0.5]);
    let bytes = expr.to_bytes().unwrap();
    assert_eq!(Expression::from_bytes(&bytes).unwrap(), expr);
}

#[test]
fn pad_length_covers_every_alignment() {
    for op_count in 0..4 {
        let expr = Expression::new(vec![0x08; op_count], vec![], vec![1.0]);
        let bytes = expr.to_bytes().unwrap();
        let pad = 4 - op_count % 4;
        assert_eq!(bytes.len(), 4 + op_count + pad + 4, "ops: {op_count}");
        assert_eq!(Expression::from_bytes(&bytes).unwrap(), expr);
    }
}

#[test]
fn truncated_path_table_is_rejected() {
    let path = Path::new(vec![PathSegment::new(
        9,
        Builder::new().push(&[1.0]).build(),
    )]);
    let bytes = path.to_bytes().unwrap();
    for cut in 1..Path::HEADER_SIZE + Path::SEGMENT_HEADER_SIZE {
        assert_eq!(
            Path::from_bytes(&bytes[..cut]),
            Err(CodecError::BufferTooShort),
            "cut at {cut}"
        );
    }
}
