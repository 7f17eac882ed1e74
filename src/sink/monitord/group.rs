//! Partition a `SampleBatch` into groups which Monitord treats as one monitor.

use metric::{AggregatedSample, Fqdsn, Period, SampleBatch};
use seahash::SeaHasher;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::slice;

type HashMapFnv<K, V> = HashMap<K, V, BuildHasherDefault<SeaHasher>>;

/// Samples of a single batch which share service, cluster, metric and period.
///
/// Host is not part of the key. A group of samples from several hosts is
/// reported to Monitord as one monitor listing each host's value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group<'a> {
    samples: Vec<&'a AggregatedSample>,
}

impl<'a> Group<'a> {
    /// The metric stream every sample of the group belongs to.
    ///
    /// Only an empty group has no `Fqdsn`; `group` never builds one.
    pub fn fqdsn(&self) -> Option<&'a Fqdsn> {
        self.first().map(|s| &s.fqdsn)
    }

    /// The aggregation period every sample of the group shares.
    pub fn period(&self) -> Option<Period> {
        self.first().map(|s| s.period)
    }

    /// The first sample placed into the group.
    pub fn first(&self) -> Option<&'a AggregatedSample> {
        self.samples.first().cloned()
    }

    /// Iterate the group's samples in batch order.
    pub fn iter(&self) -> slice::Iter<&'a AggregatedSample> {
        self.samples.iter()
    }

    /// Return the number of samples in the group.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Determine if the group holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn push(&mut self, sample: &'a AggregatedSample) {
        self.samples.push(sample);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key<'a> {
    fqdsn: &'a Fqdsn,
    period: Period,
}

impl<'a> Key<'a> {
    fn of(sample: &'a AggregatedSample) -> Key<'a> {
        Key {
            fqdsn: &sample.fqdsn,
            period: sample.period,
        }
    }
}

/// Partition `batch` into `Group`s.
///
/// Groups come back in the order their key was first seen in the batch and
/// the samples inside a group keep their relative batch order. Every sample
/// of the batch lands in exactly one group. Identity fields are compared
/// exactly, empty strings included.
pub fn group(batch: &SampleBatch) -> Vec<Group> {
    let mut index: HashMapFnv<Key, usize> = HashMapFnv::default();
    let mut groups: Vec<Group> = Vec::new();

    for sample in &batch.samples {
        let next = groups.len();
        let idx = *index.entry(Key::of(sample)).or_insert(next);
        if idx == next {
            groups.push(Group::default());
        }
        groups[idx].push(sample);
    }
    groups
}
