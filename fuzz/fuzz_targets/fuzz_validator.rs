#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonsift::{StreamingValidator, SurrogatePolicy, ValidatorOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b"\r\n", b"  "];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly lets libFuzzer mutate; every tenth call instead writes a fresh
/// header followed by whitespace-separated serialized values.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size.max(HEADER + 1) && prefix < max_size {
            let limit = max_size - prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
            let limit = max_size - prefix;
            prefix += append_value(&mut data[prefix..], size, limit);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace runs without exceeding `limit` bytes.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let runs = rng.random_range(1..=limit.min(8));
        let mut written = 0;
        for _ in 0..runs {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

/// Appends a serialized arbitrary value, truncated to `limit` bytes.
fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let len = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..len).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("serializing a Value cannot fail");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let members: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(members.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Splits `data` into non-empty byte chunks whose sizes come from a seeded
/// RNG. Boundaries may fall inside UTF-8 sequences.
fn split_chunks(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(split_seed);
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let size = rng.random_range(1..=rest.len().min(64));
        let (chunk, tail) = rest.split_at(size);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn run<'a>(
    options: ValidatorOptions,
    chunks: impl IntoIterator<Item = &'a [u8]>,
) -> Result<(), (jsonsift::ErrorKind, usize)> {
    let mut validator = StreamingValidator::new(options);
    for chunk in chunks {
        validator.feed(chunk).map_err(|err| (err.kind, err.offset))?;
    }
    validator.finish().map_err(|err| (err.kind, err.offset))
}

fn validator(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let split_seed = u64::from(u32::from_le_bytes(
        data[1..5].try_into().expect("header is five bytes"),
    ));
    let data = &data[HEADER..];

    let options = ValidatorOptions {
        surrogates: if flags & 1 == 0 {
            SurrogatePolicy::Reject
        } else {
            SurrogatePolicy::Allow
        },
        // Two bits pick a small depth limit; zero keeps the default.
        max_depth: match (flags >> 1) & 3 {
            0 => jsonsift::DEFAULT_MAX_DEPTH,
            n => usize::from(n) * 4,
        },
    };

    let whole = run(options, [data]);
    let chunked = run(options, split_chunks(data, split_seed));
    assert_eq!(whole, chunked, "chunking changed the outcome");

    if options.max_depth == jsonsift::DEFAULT_MAX_DEPTH
        && serde_json::from_slice::<Value>(data).is_ok()
    {
        assert_eq!(whole, Ok(()), "rejected a document serde_json accepts");
    }
}

fuzz_target!(|data: &[u8]| validator(data));
