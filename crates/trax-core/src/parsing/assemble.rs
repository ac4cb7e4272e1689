use crate::diagnostics::Diagnostics;
use crate::model::{SampleStore, Triplet};

/// ICP results keyed by the raw sample id printed above the table, waiting
/// to be attached to a named sample.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingTriplets {
    entries: Vec<(String, Vec<Triplet>)>,
}

impl PendingTriplets {
    /// Add results for `id`. Results for an id seen in an earlier table are
    /// appended, not replaced.
    pub fn add(&mut self, id: String, triplets: Vec<Triplet>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, pending)) => pending.extend(triplets),
            None => self.entries.push((id, triplets)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, t)| t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Name of the sample an ICP id belongs to.
///
/// An id matches a sample whose leading numeric portion starts with it. A
/// sample whose numeric portion equals the id wins over an earlier prefix
/// match, so id "1" goes to "1 Well" even when "12 Tap" was seen first.
pub fn find_sample<'a>(samples: &'a SampleStore, id: &str) -> Option<&'a str> {
    if id.is_empty() {
        return None;
    }
    samples
        .iter()
        .find(|s| s.numeric_id() == id)
        .or_else(|| samples.iter().find(|s| s.numeric_id().starts_with(id)))
        .map(|s| s.name.as_str())
}

/// Append every pending ICP column to its matching sample.
pub fn merge_vertical(
    samples: &mut SampleStore,
    pending: PendingTriplets,
    diagnostics: &mut Diagnostics,
) {
    for (id, triplets) in pending.entries {
        let Some(name) = find_sample(samples, &id).map(str::to_string) else {
            diagnostics.important(format!(
                "ICP results for sample id '{}' ({} values) match no sample name and were dropped; \
                 check that the id row above the ICP table uses the sample numbers",
                id,
                triplets.len()
            ));
            continue;
        };
        tracing::debug!(id = %id, sample = %name, count = triplets.len(), "merging ICP results");
        if let Some(record) = samples.get_mut(&name) {
            record.triplets.extend(triplets);
        }
    }
}
