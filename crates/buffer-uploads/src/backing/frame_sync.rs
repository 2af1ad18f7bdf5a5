//! Frame tracking deciding when released resources are no longer in use by any frame in flight.
//!
//! Released resources are pushed into the current *write queue*. Every frame in flight is associated with either
//! [`AB::A`] or [`AB::B`]. Once all frames of one AB have ended, the queue that was written while they were running is
//! drained and the write queue switches over. A resource is thus only handed back once every frame that may have
//! referenced it has finished.

use crate::backing::ab::{ABArray, AB};
use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering::{Relaxed, Release};

#[derive(Debug)]
pub struct FrameSync {
	frame_mutex: CachePadded<Mutex<ABArray<u32>>>,
	write_queue_ab: CachePadded<AtomicU32>,
}

impl Default for FrameSync {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameSync {
	pub fn new() -> Self {
		Self {
			frame_mutex: CachePadded::new(Mutex::new(ABArray::new(|| 0))),
			write_queue_ab: CachePadded::new(AtomicU32::new(AB::B.to_u32())),
		}
	}

	/// The queue released resources must be pushed into right now.
	#[inline]
	pub fn write_queue_ab(&self) -> AB {
		AB::from_u32(self.write_queue_ab.load(Relaxed)).unwrap_or(AB::A)
	}

	#[inline]
	pub fn frame_ab(&self) -> AB {
		!self.write_queue_ab()
	}

	/// Starts a new frame and returns its AB. If the other AB ran dry of frames, like at startup, the queues are
	/// switched and `drain` is called with the queue that may now be collected. `drain` runs while the switch is
	/// locked, it should only move resources out of the queue and leave destruction to the caller.
	pub fn frame_begin<R>(&self, drain: impl FnOnce(AB) -> R) -> (AB, Option<R>) {
		let mut guard = self.frame_mutex.lock();
		let frame_ab = self.frame_ab();
		guard[frame_ab] += 1;

		let drained = (guard[!frame_ab] == 0).then(|| self.switch(!frame_ab, drain));
		(frame_ab, drained)
	}

	/// Ends a frame previously started with [`Self::frame_begin`]. Returns whatever `drain` returned if this was the
	/// last frame of its AB and the queues switched.
	pub fn frame_end<R>(&self, dropped_frame_ab: AB, drain: impl FnOnce(AB) -> R) -> Option<R> {
		let mut guard = self.frame_mutex.lock();
		let frame_cnt = &mut guard[dropped_frame_ab];
		match *frame_cnt {
			0 => panic!("frame ref counting underflow"),
			1 => {
				*frame_cnt = 0;
				(self.frame_ab() != dropped_frame_ab).then(|| self.switch(dropped_frame_ab, drain))
			}
			_ => {
				*frame_cnt -= 1;
				None
			}
		}
	}

	fn switch<R>(&self, dropped_frame_ab: AB, drain: impl FnOnce(AB) -> R) -> R {
		let collect_queue = !dropped_frame_ab;
		let drained = drain(collect_queue);
		// Release so a frame begun on another thread afterward sees resources going to the new queue
		self.write_queue_ab.store(collect_queue.to_u32(), Release);
		drained
	}
}
