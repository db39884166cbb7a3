// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG for picking cards and
/// shuffling quiz options.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    // Generate random number in range [0, max). `max` must be non-zero.
    pub fn generate(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// A random index into a slice of length `len`, or `None` if it's empty.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.generate(len as u32) as usize)
        }
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    for i in (1..len).rev() {
        let j = rng.generate(i as u32 + 1) as usize;
        v.swap(i, j);
    }
    v
}

/// Pick `n` elements without replacement, in random order. Returns fewer than
/// `n` elements only if `v` is shorter than `n`.
pub fn sample<T>(v: Vec<T>, n: usize, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    let len = v.len();
    let n = n.min(len);
    // Partial Fisher-Yates: the first `n` slots end up holding the sample.
    for i in 0..n {
        let j = i + rng.generate((len - i) as u32) as usize;
        v.swap(i, j);
    }
    v.truncate(n);
    v
}
