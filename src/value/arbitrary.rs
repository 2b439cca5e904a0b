use super::Value;

use quickcheck::{Arbitrary, Gen};

impl Arbitrary for Value {
    fn arbitrary(gen: &mut Gen) -> Self {
        arbitrary_value(gen, 3)
    }
}

// Finite, acyclic values only: compound choices disappear once the depth
// allowance is used up.
fn arbitrary_value(gen: &mut Gen, depth: usize) -> Value {
    let atoms: &[u8] = &[0, 1, 2, 3, 4, 5, 6];
    let all: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    let choices = if depth == 0 { atoms } else { all };

    match gen.choose(choices).copied().unwrap() {
        0 => Value::Null,
        1 => Value::boolean(bool::arbitrary(gen)),
        2 => Value::fixnum(i64::arbitrary(gen)),
        3 => Value::flonum(f64::arbitrary(gen)),
        4 => Value::character(char::arbitrary(gen)),
        5 => Value::string(String::arbitrary(gen)),
        6 => Value::symbol(String::arbitrary(gen)),
        7 => {
            let elements = arbitrary_elements(gen, depth - 1);
            Value::proper_list(elements)
        }
        8 => {
            let elements = arbitrary_elements(gen, depth - 1);
            Value::vector(elements)
        }
        _ => Value::cons(
            arbitrary_value(gen, depth - 1),
            Value::fixnum(i64::arbitrary(gen)),
        ),
    }
}

fn arbitrary_elements(gen: &mut Gen, depth: usize) -> Vec<Value> {
    let len = *gen.choose(&[0usize, 1, 2, 3]).unwrap();
    (0..len).map(|_| arbitrary_value(gen, depth)).collect()
}
