//! Ten-minute bucket scheduler
//!
//! Turns a stream of minute-of-hour readings into exactly one firing per
//! ten-minute boundary. The poll cadence is the caller's business; the
//! scheduler only reacts to the minute it is handed.

/// Number of ten-minute buckets in an hour
pub const BUCKET_COUNT: usize = 6;

/// One of the six ten-minute markers (:00, :10, ... :50) within an hour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bucket {
    Minute00,
    Minute10,
    Minute20,
    Minute30,
    Minute40,
    Minute50,
}

impl Bucket {
    pub const ALL: [Bucket; BUCKET_COUNT] = [
        Bucket::Minute00,
        Bucket::Minute10,
        Bucket::Minute20,
        Bucket::Minute30,
        Bucket::Minute40,
        Bucket::Minute50,
    ];

    /// Bucket whose boundary is exactly `minute`
    ///
    /// `None` for minutes that are not a multiple of ten and for anything
    /// outside 0..=59.
    pub fn from_minute(minute: u8) -> Option<Self> {
        if minute % 10 != 0 {
            return None;
        }
        Self::ALL.get(usize::from(minute / 10)).copied()
    }

    /// Minute-of-hour label (0, 10, ... 50)
    pub fn label(self) -> u8 {
        self.index() as u8 * 10
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// "Already fired this occurrence" flag for each bucket
///
/// At most one flag is ever set. [`BucketSet::fire`] swaps in a whole new
/// flag array, so no reader can see zero or two flags mid-update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BucketSet {
    flags: [bool; BUCKET_COUNT],
}

impl BucketSet {
    pub const fn new() -> Self {
        Self {
            flags: [false; BUCKET_COUNT],
        }
    }

    pub fn is_fired(&self, bucket: Bucket) -> bool {
        self.flags[bucket.index()]
    }

    /// The bucket that fired most recently, if any
    pub fn fired(&self) -> Option<Bucket> {
        Bucket::ALL.into_iter().find(|b| self.is_fired(*b))
    }

    /// Clear every flag and mark `bucket` as fired
    pub fn fire(&mut self, bucket: Bucket) {
        let mut next = [false; BUCKET_COUNT];
        next[bucket.index()] = true;
        self.flags = next;
    }
}

/// Exactly-once-per-boundary firing decision
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    buckets: BucketSet,
}

impl Scheduler {
    pub const fn new() -> Self {
        Self {
            buckets: BucketSet::new(),
        }
    }

    /// Decide whether a sample is due at `minute`
    ///
    /// Due iff `minute` sits on a ten-minute boundary whose bucket has not
    /// fired yet. A due decision fires that bucket and clears the others;
    /// every other call leaves the bucket set untouched.
    pub fn poll(&mut self, minute: u8) -> bool {
        let Some(bucket) = Bucket::from_minute(minute) else {
            return false;
        };
        if self.buckets.is_fired(bucket) {
            return false;
        }
        self.buckets.fire(bucket);
        debug!("Bucket :{} fired", bucket.label());
        true
    }

    pub fn buckets(&self) -> &BucketSet {
        &self.buckets
    }
}
