//! Fixed-capacity ring of live samples.
//!
//! [`SampleRing`] has exactly one producer (the ingest loop) and any number
//! of readers. Neither side takes a lock or waits on the other. Samples are
//! packed into plain `AtomicU64` words (see [`RingSample`]) and every slot
//! has its own sequence word:
//!
//! * the producer marks the slot odd (`2 * pos + 1`), stores the words, marks
//!   it even (`2 * pos + 2`) with `Release`, and only then publishes the new
//!   write count with `Release`;
//! * a reader loads the count with `Acquire`, reads the sequence, copies the
//!   words and re-reads the sequence. An odd value, a change between the two
//!   reads or a sequence naming a different position means the slot is being
//!   or has been overwritten, and the reader skips it.
//!
//! A snapshot can therefore be stale or short but never holds a sample mixed
//! from two writes. Readers never store anything, so they cannot hold up the
//! producer.

use crossbeam_utils::CachePadded;
use std::marker::PhantomData;
use std::sync::atomic::{fence, AtomicU64, Ordering};

use model::{LiveInputSample, LivePositionSample};

pub const DEFAULT_CAPACITY: usize = 512;

/// Upper bound on [`RingSample::WORDS`].
pub const MAX_WORDS: usize = 4;

/// A sample that can be stored in a [`SampleRing`] as a fixed number of
/// 64-bit words.
pub trait RingSample: Copy {
    /// Between 1 and [`MAX_WORDS`].
    const WORDS: usize;

    /// `out.len() == Self::WORDS`.
    fn to_words(&self, out: &mut [u64]);

    /// `words.len() == Self::WORDS`.
    fn from_words(words: &[u64]) -> Self;
}

fn pack_f32(lo: f32, hi: f32) -> u64 {
    u64::from(lo.to_bits()) | u64::from(hi.to_bits()) << 32
}

fn unpack_f32(w: u64) -> (f32, f32) {
    (f32::from_bits(w as u32), f32::from_bits((w >> 32) as u32))
}

impl RingSample for u64 {
    const WORDS: usize = 1;

    fn to_words(&self, out: &mut [u64]) {
        out[0] = *self;
    }

    fn from_words(words: &[u64]) -> Self {
        words[0]
    }
}

impl RingSample for LiveInputSample {
    const WORDS: usize = 4;

    fn to_words(&self, out: &mut [u64]) {
        out[0] = pack_f32(self.throttle, self.brake);
        out[1] = pack_f32(self.steer, self.speed_kph);
        out[2] = u64::from(self.clutch)
            | u64::from(self.gear as u8) << 8
            | u64::from(self.engine_rpm) << 16
            | u64::from(self.drs) << 32
            | u64::from(self.rev_lights_percent) << 40;
        out[3] = self.timestamp_ms;
    }

    fn from_words(words: &[u64]) -> Self {
        let (throttle, brake) = unpack_f32(words[0]);
        let (steer, speed_kph) = unpack_f32(words[1]);
        let misc = words[2];
        Self {
            throttle,
            brake,
            steer,
            clutch: misc as u8,
            gear: (misc >> 8) as u8 as i8,
            engine_rpm: (misc >> 16) as u16,
            drs: (misc >> 32) & 1 == 1,
            rev_lights_percent: (misc >> 40) as u8,
            speed_kph,
            timestamp_ms: words[3],
        }
    }
}

impl RingSample for LivePositionSample {
    const WORDS: usize = 3;

    fn to_words(&self, out: &mut [u64]) {
        out[0] = pack_f32(self.x, self.y);
        out[1] = u64::from(self.z.to_bits());
        out[2] = self.timestamp_ms;
    }

    fn from_words(words: &[u64]) -> Self {
        let (x, y) = unpack_f32(words[0]);
        Self { x, y, z: f32::from_bits(words[1] as u32), timestamp_ms: words[2] }
    }
}

pub struct SampleRing<T> {
    /// Per slot: 0 = never written, odd = write in progress,
    /// `2 * pos + 2` = holds the sample pushed at `pos`.
    seqs: Box<[AtomicU64]>,
    words: Box<[AtomicU64]>,
    write_count: CachePadded<AtomicU64>,
    _sample: PhantomData<fn() -> T>,
}

impl<T: RingSample> SampleRing<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "SampleRing capacity must be > 0");
        assert!((1..=MAX_WORDS).contains(&T::WORDS), "RingSample::WORDS out of range");
        let seqs = (0..capacity).map(|_| AtomicU64::new(0)).collect();
        let words = (0..capacity * T::WORDS).map(|_| AtomicU64::new(0)).collect();
        Self {
            seqs,
            words,
            write_count: CachePadded::new(AtomicU64::new(0)),
            _sample: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.seqs.len()
    }

    /// Total number of pushes since construction.
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::Acquire)
    }

    /// Number of samples currently retained (at most `capacity`).
    pub fn len(&self) -> usize {
        let w = self.write_count();
        w.min(self.capacity() as u64) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.write_count() == 0
    }

    /// Append a sample, overwriting the oldest once full. Single producer only.
    pub fn push(&self, value: T) {
        // Only the producer ever stores the counter, so a relaxed read is current.
        let pos = self.write_count.load(Ordering::Relaxed);
        let idx = self.index(pos);
        let mut buf = [0u64; MAX_WORDS];
        value.to_words(&mut buf[..T::WORDS]);

        let seq = &self.seqs[idx];
        seq.store(2 * pos + 1, Ordering::Relaxed);
        fence(Ordering::Release);
        for (dst, src) in self.slot_words(idx).iter().zip(&buf[..T::WORDS]) {
            dst.store(*src, Ordering::Relaxed);
        }
        seq.store(2 * pos + 2, Ordering::Release);
        self.write_count.store(pos + 1, Ordering::Release);
    }

    /// Copy the most recent samples into `out`, oldest first.
    ///
    /// Asks for `min(out.len(), write_count, capacity)` samples and returns how
    /// many were written to the front of `out`.
    pub fn copy_into(&self, out: &mut [T]) -> usize {
        let mut n = 0;
        self.for_each_recent(out.len(), |value| {
            out[n] = value;
            n += 1;
        });
        n
    }

    /// Same selection as [`copy_into`](Self::copy_into), collected into a
    /// vector of at most `max_count` entries.
    pub fn snapshot(&self, max_count: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(max_count.min(self.capacity()));
        self.for_each_recent(max_count, |value| out.push(value));
        out
    }

    /// The most recently pushed sample, or `None` if nothing was ever pushed.
    pub fn peek_latest(&self) -> Option<T> {
        let w = self.write_count();
        if w == 0 {
            return None;
        }
        // When lapped between the counter read and the slot read, the newer
        // value is just as valid for "latest".
        self.read(w - 1).filter(|(at, _)| *at >= w - 1).map(|(_, value)| value)
    }

    /// Visit the last `min(max, write_count, capacity)` positions oldest
    /// first, skipping slots that no longer hold their position.
    fn for_each_recent(&self, max: usize, mut f: impl FnMut(T)) {
        let w = self.write_count();
        let want = (max as u64).min(w).min(self.capacity() as u64);
        for pos in (w - want)..w {
            match self.read(pos) {
                Some((at, value)) if at == pos => f(value),
                _ => {}
            }
        }
    }

    /// Read the slot `pos` maps to. Returns the position the sample was
    /// pushed at, or `None` if the slot is empty or changed under the read.
    fn read(&self, pos: u64) -> Option<(u64, T)> {
        let idx = self.index(pos);
        let seq = &self.seqs[idx];
        let before = seq.load(Ordering::Acquire);
        if before == 0 || before % 2 == 1 {
            return None;
        }
        let mut buf = [0u64; MAX_WORDS];
        for (dst, src) in buf.iter_mut().zip(self.slot_words(idx)) {
            *dst = src.load(Ordering::Relaxed);
        }
        fence(Ordering::Acquire);
        if seq.load(Ordering::Relaxed) != before {
            return None;
        }
        Some((before / 2 - 1, T::from_words(&buf[..T::WORDS])))
    }

    fn index(&self, pos: u64) -> usize {
        (pos % self.seqs.len() as u64) as usize
    }

    fn slot_words(&self, idx: usize) -> &[AtomicU64] {
        &self.words[idx * T::WORDS..(idx + 1) * T::WORDS]
    }
}

impl<T: RingSample> Default for SampleRing<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SampleRing<LiveInputSample>>();
    assert::<SampleRing<LivePositionSample>>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_ring() {
        let ring = SampleRing::<u64>::new(4);
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.peek_latest(), None);
        assert!(ring.snapshot(4).is_empty());
        let mut out = [0u64; 4];
        assert_eq!(ring.copy_into(&mut out), 0);
    }

    #[test]
    fn test_partial_fill_in_order() {
        let ring = SampleRing::new(8);
        for i in 1..=5u64 {
            ring.push(i);
        }
        assert_eq!(ring.snapshot(5), vec![1, 2, 3, 4, 5]);
        assert_eq!(ring.snapshot(3), vec![3, 4, 5]);
        assert_eq!(ring.snapshot(100), vec![1, 2, 3, 4, 5]);
        assert_eq!(ring.peek_latest(), Some(5));
    }

    #[test]
    fn test_overwrite_keeps_last_capacity() {
        let ring = SampleRing::new(4);
        for i in 0..10u64 {
            ring.push(i);
        }
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.write_count(), 10);
        assert_eq!(ring.snapshot(4), vec![6, 7, 8, 9]);
        assert_eq!(ring.peek_latest(), Some(9));
    }

    #[test]
    fn test_copy_into_respects_caller_slice() {
        let ring = SampleRing::new(8);
        for i in 0..6u64 {
            ring.push(i);
        }
        let mut out = [0u64; 3];
        assert_eq!(ring.copy_into(&mut out), 3);
        assert_eq!(out, [3, 4, 5]);

        let mut wide = [u64::MAX; 10];
        assert_eq!(ring.copy_into(&mut wide), 6);
        assert_eq!(&wide[..6], &[0, 1, 2, 3, 4, 5]);
        assert_eq!(wide[6], u64::MAX);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        SampleRing::<u64>::new(0);
    }

    #[test]
    fn test_slot_mid_write_is_skipped() {
        let ring = SampleRing::new(4);
        for i in 0..4u64 {
            ring.push(i);
        }
        // Producer halfway through overwriting position 1 with position 5.
        ring.seqs[1].store(2 * 5 + 1, Ordering::Relaxed);
        assert_eq!(ring.snapshot(4), vec![0, 2, 3]);
        let mut out = [0u64; 4];
        assert_eq!(ring.copy_into(&mut out), 3);
        assert_eq!(&out[..3], &[0, 2, 3]);

        // Finished write for a later lap: stale position, still skipped.
        ring.seqs[1].store(2 * 5 + 2, Ordering::Relaxed);
        assert_eq!(ring.snapshot(4), vec![0, 2, 3]);
    }

    #[test]
    fn test_live_samples_survive_packing() {
        let input = LiveInputSample {
            throttle: 0.75,
            brake: 0.125,
            steer: -0.5,
            clutch: 40,
            gear: -1,
            engine_rpm: 11_500,
            drs: true,
            rev_lights_percent: 88,
            speed_kph: 287.0,
            timestamp_ms: u64::MAX - 3,
        };
        let inputs = SampleRing::new(2);
        inputs.push(input);
        assert_eq!(inputs.peek_latest(), Some(input));

        let pos = LivePositionSample { x: -812.5, y: 3.25, z: f32::MIN_POSITIVE, timestamp_ms: 9 };
        let positions = SampleRing::new(2);
        positions.push(pos);
        assert_eq!(positions.snapshot(1), vec![pos]);
    }

    #[derive(Clone, Copy, Debug, PartialEq)]
    struct Pair {
        a: u64,
        b: u64,
    }

    impl RingSample for Pair {
        const WORDS: usize = 2;

        fn to_words(&self, out: &mut [u64]) {
            out[0] = self.a;
            out[1] = self.b;
        }

        fn from_words(words: &[u64]) -> Self {
            Self { a: words[0], b: words[1] }
        }
    }

    #[test]
    fn test_concurrent_reader_never_sees_torn_sample() {
        let ring = Arc::new(SampleRing::new(16));
        let done = Arc::new(AtomicBool::new(false));

        let producer = {
            let ring = Arc::clone(&ring);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for i in 0..200_000u64 {
                    ring.push(Pair { a: i, b: !i });
                }
                done.store(true, Ordering::Release);
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let ring = Arc::clone(&ring);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    while !done.load(Ordering::Acquire) {
                        let snap = ring.snapshot(16);
                        for p in &snap {
                            assert_eq!(p.b, !p.a, "torn sample {p:?}");
                        }
                        for w in snap.windows(2) {
                            assert!(w[0].a < w[1].a, "out of order: {:?}", w);
                        }
                    }
                })
            })
            .collect();

        producer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(ring.peek_latest().map(|p| p.a), Some(199_999));
    }

    proptest! {
        #[test]
        fn prop_snapshot_is_last_pushes_in_order(
            cap in 1usize..64,
            values in proptest::collection::vec(any::<u64>(), 0..200),
        ) {
            let ring = SampleRing::new(cap);
            for v in &values {
                ring.push(*v);
            }
            let keep = values.len().min(cap);
            let expected = &values[values.len() - keep..];
            prop_assert_eq!(ring.snapshot(cap), expected.to_vec());
            prop_assert_eq!(ring.peek_latest(), values.last().copied());
        }
    }
}
