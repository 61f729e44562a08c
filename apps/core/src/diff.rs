use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One step of an edit script. Positions refer to the live list at the moment
/// the step is applied; `Move` removes at `from` and then inserts at `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp<T> {
    Remove { position: usize },
    Insert { position: usize, item: T },
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    OutOfBounds {
        step: usize,
        position: usize,
        len: usize,
    },
}

impl Display for ApplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds {
                step,
                position,
                len,
            } => write!(
                f,
                "edit step {step} targets position {position} in a list of {len}"
            ),
        }
    }
}

impl std::error::Error for ApplyError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript<T> {
    ops: Vec<EditOp<T>>,
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<T> EditScript<T> {
    pub fn ops(&self) -> &[EditOp<T>] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<EditOp<T>> {
        self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// True when applying the script leaves the list untouched.
    pub fn is_noop(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn insert_count(&self) -> usize {
        self.count(|op| matches!(op, EditOp::Insert { .. }))
    }

    pub fn remove_count(&self) -> usize {
        self.count(|op| matches!(op, EditOp::Remove { .. }))
    }

    pub fn move_count(&self) -> usize {
        self.count(|op| matches!(op, EditOp::Move { .. }))
    }

    fn count(&self, predicate: impl Fn(&EditOp<T>) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }

    /// Same steps with every inserted item converted.
    pub fn map<U>(&self, mut convert: impl FnMut(&T) -> U) -> EditScript<U> {
        let ops = self
            .ops
            .iter()
            .map(|op| match op {
                EditOp::Remove { position } => EditOp::Remove {
                    position: *position,
                },
                EditOp::Insert { position, item } => EditOp::Insert {
                    position: *position,
                    item: convert(item),
                },
                EditOp::Move { from, to } => EditOp::Move {
                    from: *from,
                    to: *to,
                },
            })
            .collect();
        EditScript { ops }
    }
}

impl<T: Clone> EditScript<T> {
    pub fn apply_to(&self, list: &mut Vec<T>) -> Result<(), ApplyError> {
        for (step, op) in self.ops.iter().enumerate() {
            match op {
                EditOp::Remove { position } => {
                    check_bounds(step, *position, list.len())?;
                    list.remove(*position);
                }
                EditOp::Insert { position, item } => {
                    check_bounds(step, *position, list.len() + 1)?;
                    list.insert(*position, item.clone());
                }
                EditOp::Move { from, to } => {
                    check_bounds(step, *from, list.len())?;
                    check_bounds(step, *to, list.len())?;
                    let item = list.remove(*from);
                    list.insert(*to, item);
                }
            }
        }
        Ok(())
    }
}

fn check_bounds(step: usize, position: usize, len: usize) -> Result<(), ApplyError> {
    if position < len {
        Ok(())
    } else {
        Err(ApplyError::OutOfBounds {
            step,
            position,
            len,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Common(usize),
    Moved(usize),
    Inserted,
}

impl Source {
    fn old_index(self) -> Option<usize> {
        match self {
            Self::Common(index) | Self::Moved(index) => Some(index),
            Self::Inserted => None,
        }
    }
}

/// Edit script turning `old` into `new`.
///
/// Items in the longest common subsequence stay where they are. A removed item
/// equal to an inserted one becomes a single move. Steps come out as removals
/// (back to front), then moves, then insertions (front to back).
pub fn diff<T: PartialEq + Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    let mut sources = vec![Source::Inserted; new.len()];
    let mut old_kept = vec![false; old.len()];
    for (old_index, new_index) in common_subsequence(old, new) {
        sources[new_index] = Source::Common(old_index);
        old_kept[old_index] = true;
    }

    for old_index in 0..old.len() {
        if old_kept[old_index] {
            continue;
        }
        let paired = (0..new.len()).find(|&new_index| {
            sources[new_index] == Source::Inserted && old[old_index] == new[new_index]
        });
        if let Some(new_index) = paired {
            sources[new_index] = Source::Moved(old_index);
            old_kept[old_index] = true;
        }
    }

    let mut ops = Vec::new();
    let mut live: Vec<usize> = (0..old.len()).collect();

    for old_index in (0..old.len()).rev() {
        if !old_kept[old_index] {
            ops.push(EditOp::Remove {
                position: old_index,
            });
            live.remove(old_index);
        }
    }

    let mut predecessor: Option<usize> = None;
    for source in &sources {
        if let Source::Moved(token) = *source {
            if let Some(from) = position_of(&live, token) {
                live.remove(from);
                let to = predecessor
                    .and_then(|previous| position_of(&live, previous))
                    .map_or(0, |position| position + 1);
                live.insert(to, token);
                if from != to {
                    ops.push(EditOp::Move { from, to });
                }
            }
        }
        if let Some(token) = source.old_index() {
            predecessor = Some(token);
        }
    }

    for (position, source) in sources.iter().enumerate() {
        if *source == Source::Inserted {
            ops.push(EditOp::Insert {
                position,
                item: new[position].clone(),
            });
        }
    }

    EditScript { ops }
}

fn position_of(live: &[usize], token: usize) -> Option<usize> {
    live.iter().position(|&candidate| candidate == token)
}

/// Matched `(old, new)` index pairs of a shortest edit path (Myers, O(ND)).
fn common_subsequence<T: PartialEq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let n = old.len() as isize;
    let m = new.len() as isize;
    if n == 0 || m == 0 {
        return Vec::new();
    }

    let max = n + m;
    let mut frontier = vec![0_isize; (2 * max + 2) as usize];
    let mut trace: Vec<Vec<isize>> = Vec::new();

    'search: for d in 0..=max {
        trace.push(frontier.clone());
        let mut k = -d;
        while k <= d {
            let slot = (k + max) as usize;
            let mut x = if steps_down(&frontier, slot, k, d) {
                frontier[slot + 1]
            } else {
                frontier[slot - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && old[x as usize] == new[y as usize] {
                x += 1;
                y += 1;
            }
            frontier[slot] = x;
            if x >= n && y >= m {
                break 'search;
            }
            k += 2;
        }
    }

    let mut pairs = Vec::new();
    let (mut x, mut y) = (n, m);
    for (d, frontier) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;
        let slot = (k + max) as usize;
        let prev_k = if steps_down(frontier, slot, k, d) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = frontier[(prev_k + max) as usize];
        let prev_y = prev_x - prev_k;
        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            pairs.push((x as usize, y as usize));
        }
        if d > 0 {
            x = prev_x;
            y = prev_y;
        }
    }

    pairs.reverse();
    pairs
}

fn steps_down(frontier: &[isize], slot: usize, k: isize, d: isize) -> bool {
    k == -d || (k != d && frontier[slot - 1] < frontier[slot + 1])
}
