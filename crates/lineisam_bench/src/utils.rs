//! Benchmark utilities.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generates a data file of `count` lines, each starting with a random
/// `key_length`-byte alphanumeric key followed by `payload_size` bytes.
pub fn random_data_file(count: usize, key_length: usize, payload_size: usize) -> (Vec<u8>, Vec<Vec<u8>>) {
    let mut rng = rand::thread_rng();
    let mut data = Vec::with_capacity(count * (key_length + payload_size + 2));
    let mut keys = Vec::with_capacity(count);

    for _ in 0..count {
        let key: Vec<u8> = (0..key_length).map(|_| rng.sample(Alphanumeric)).collect();
        data.extend_from_slice(&key);
        data.push(b',');
        data.extend((0..payload_size).map(|_| rng.sample(Alphanumeric)));
        data.push(b'\n');
        keys.push(key);
    }

    (data, keys)
}
