//! Reordering helpers for user-arranged sequences such as story lists.

/// An index outside the sequence being reordered.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("index {index} is out of range for a sequence of {len} items")]
pub struct OrderingError {
	/// Offending index.
	pub index: usize,
	/// Length of the sequence at the time of the call.
	pub len: usize,
}

fn check(len: usize, index: usize) -> Result<(), OrderingError> {
	if index < len {
		Ok(())
	} else {
		Err(OrderingError { index, len })
	}
}

/// Removes the item at `from` and reinserts it at `to`. Nothing moves on error.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), OrderingError> {
	check(items.len(), from)?;
	check(items.len(), to)?;
	let item = items.remove(from);
	items.insert(to, item);
	Ok(())
}

/// Swaps the item at `index` with its predecessor.
pub fn move_up<T>(items: &mut [T], index: usize) -> Result<(), OrderingError> {
	check(items.len(), index)?;
	let Some(prev) = index.checked_sub(1) else {
		return Err(OrderingError {
			index,
			len: items.len(),
		});
	};
	items.swap(prev, index);
	Ok(())
}

/// Swaps the item at `index` with its successor.
pub fn move_down<T>(items: &mut [T], index: usize) -> Result<(), OrderingError> {
	check(items.len(), index)?;
	check(items.len(), index + 1)?;
	items.swap(index, index + 1);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn move_item_reinserts_at_target() {
		let mut stories = vec!["intro", "alarm", "escalation", "debrief"];
		move_item(&mut stories, 3, 1).unwrap();
		assert_eq!(stories, ["intro", "debrief", "alarm", "escalation"]);
		move_item(&mut stories, 0, 3).unwrap();
		assert_eq!(stories, ["debrief", "alarm", "escalation", "intro"]);
	}

	#[test]
	fn move_up_and_down_swap_neighbours() {
		let mut items = vec![1, 2, 3];
		move_up(&mut items, 2).unwrap();
		assert_eq!(items, [1, 3, 2]);
		move_down(&mut items, 0).unwrap();
		assert_eq!(items, [3, 1, 2]);
	}

	#[test]
	fn edges_of_the_sequence_are_errors() {
		let mut items = vec!['a', 'b'];
		assert_eq!(move_up(&mut items, 0), Err(OrderingError { index: 0, len: 2 }));
		assert_eq!(move_down(&mut items, 1), Err(OrderingError { index: 2, len: 2 }));
		assert_eq!(move_item(&mut items, 0, 5), Err(OrderingError { index: 5, len: 2 }));
		assert_eq!(items, ['a', 'b']);
		assert!(move_up::<u8>(&mut [], 0).is_err());
	}
}
