// fan-out router: resolve slot, then append to every admitting sequence
use std::sync::Arc;

use tracing::trace;

use crate::core::expand::Expander;
use crate::core::record::Entry;
use crate::core::streams::Expanded;

impl Expander<'_> {
    /// Resolves `slot`/`player_slot` and appends the entry to each sequence
    /// whose allow-set admits its type. No admitting sequence is not an error.
    pub(crate) fn route(&self, mut entry: Entry, out: &mut Expanded) {
        self.meta.resolve(&mut entry);
        entry.settle_columns();

        let entry = Arc::new(entry);
        let mut hits = 0usize;
        for (name, admit) in self.streams.iter() {
            if admit.admits(&entry.kind) {
                out.push(name, Arc::clone(&entry));
                hits += 1;
            }
        }

        if hits == 0 {
            trace!(kind = %entry.kind, "entry admitted by no sequence");
        }
    }
}
