use std::collections::BTreeSet;

use super::model::{SwitchKind, SwitchMeta};

/// Selected switch kinds. `None` means "no filter" (show all).
pub type KindFilter = Option<BTreeSet<SwitchKind>>;

/// Sorted set of kinds that occur in `metas`, for building the selector.
pub fn kinds_present(metas: &[SwitchMeta]) -> BTreeSet<SwitchKind> {
    metas.iter().map(SwitchMeta::kind).collect()
}

/// Records whose kind is selected, in their original order.
///
/// * `None` → every record passes
/// * empty selection → nothing passes
pub fn filter_by_kind<'a>(metas: &'a [SwitchMeta], filter: &KindFilter) -> Vec<&'a SwitchMeta> {
    match filter {
        None => metas.iter().collect(),
        Some(selected) => metas
            .iter()
            .filter(|m| selected.contains(&m.kind()))
            .collect(),
    }
}
