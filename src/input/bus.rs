//! Scoped button event bus.
//!
//! The bus is the registration table between the button poller and whoever
//! currently wants input. Listeners register for one [`EventKind`] within one
//! [`Scope`] (the owning host), so dialogs of different hosts never see each
//! other's events. Each listener owns a small mailbox; emitting an event
//! copies it into every matching mailbox and wakes the waiting receiver.
//!
//! Deregistration frees the slot immediately: pending events are discarded
//! and receivers waiting on the slot resolve to `None`.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::waitqueue::WakerRegistration;
use heapless::Deque;

use super::buttons::{ButtonEvent, ButtonSet, EventKind};
use crate::error::Error;
use crate::log_warn;

/// Maximum number of simultaneously registered listeners.
pub const MAX_LISTENERS: usize = 8;

/// Events buffered per listener before the oldest is dropped.
pub const MAILBOX_DEPTH: usize = 4;

/// Identifies the host a listener belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Scope(pub u8);

/// Handle returned by [`EventBus::register`].
///
/// Carries the slot generation so a stale handle never reads events of a
/// listener that later reused the same slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ListenerId {
    index: u8,
    generation: u16,
}

struct Delivery {
    stamp: u32,
    buttons: ButtonSet,
}

struct Slot {
    id: ListenerId,
    kind: EventKind,
    scope: Scope,
    mailbox: Deque<Delivery, MAILBOX_DEPTH>,
    waker: WakerRegistration,
}

struct Table {
    slots: [Option<Slot>; MAX_LISTENERS],
    next_generation: u16,
    next_stamp: u32,
    /// Events lost to full mailboxes since start-up.
    dropped: u32,
}

impl Table {
    fn slot(
        &self,
        id: ListenerId,
    ) -> Option<&Slot> {
        self.slots
            .get(usize::from(id.index))
            .and_then(Option::as_ref)
            .filter(|slot| slot.id == id)
    }

    fn slot_mut(
        &mut self,
        id: ListenerId,
    ) -> Option<&mut Slot> {
        self.slots
            .get_mut(usize::from(id.index))
            .and_then(Option::as_mut)
            .filter(|slot| slot.id == id)
    }
}

/// True if stamp `a` was issued before stamp `b` (wrap-around safe).
#[inline]
const fn issued_before(
    a: u32,
    b: u32,
) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

/// Button event registration table shared by a host and its input source.
pub struct EventBus<M: RawMutex> {
    table: Mutex<M, RefCell<Table>>,
}

impl<M: RawMutex> EventBus<M> {
    pub const fn new() -> Self {
        Self {
            table: Mutex::new(RefCell::new(Table {
                slots: [const { None }; MAX_LISTENERS],
                next_generation: 0,
                next_stamp: 0,
                dropped: 0,
            })),
        }
    }

    /// Register a listener for `kind` events emitted in `scope`.
    pub fn register(
        &self,
        kind: EventKind,
        scope: Scope,
    ) -> Result<ListenerId, Error> {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            let index = table
                .slots
                .iter()
                .position(Option::is_none)
                .ok_or(Error::ListenerTableFull)?;

            let generation = table.next_generation;
            table.next_generation = generation.wrapping_add(1);

            let id = ListenerId {
                index: index as u8,
                generation,
            };
            table.slots[index] = Some(Slot {
                id,
                kind,
                scope,
                mailbox: Deque::new(),
                waker: WakerRegistration::new(),
            });
            Ok(id)
        })
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn deregister(
        &self,
        id: ListenerId,
    ) -> bool {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            if table.slot(id).is_none() {
                return false;
            }
            if let Some(mut slot) = table.slots[usize::from(id.index)].take() {
                // Let a parked receiver observe the deregistration
                slot.waker.wake();
            }
            true
        })
    }

    /// Deliver `event` to every listener of its kind in `scope`.
    ///
    /// Returns the number of listeners that received it. A listener whose
    /// mailbox is full loses its oldest event, which is logged as a warning.
    pub fn emit(
        &self,
        scope: Scope,
        event: ButtonEvent,
    ) -> usize {
        let (delivered, dropped, total) = self.table.lock(|table| {
            let mut table = table.borrow_mut();
            let stamp = table.next_stamp;
            table.next_stamp = stamp.wrapping_add(1);

            let mut delivered = 0;
            let mut dropped = 0u32;
            for slot in table.slots.iter_mut().flatten() {
                if slot.scope != scope || slot.kind != event.kind() {
                    continue;
                }
                if slot.mailbox.is_full() {
                    slot.mailbox.pop_front();
                    dropped += 1;
                }
                slot.mailbox
                    .push_back(Delivery {
                        stamp,
                        buttons: event.buttons(),
                    })
                    .ok();
                slot.waker.wake();
                delivered += 1;
            }
            table.dropped = table.dropped.wrapping_add(dropped);
            (delivered, dropped, table.dropped)
        });

        // Logged outside the table lock
        if dropped > 0 {
            log_warn!("Bus: mailbox full, {} dropped", total);
        }
        delivered
    }

    /// Take the next pending event for `id` without waiting.
    pub fn try_receive(
        &self,
        id: ListenerId,
    ) -> Option<ButtonSet> {
        self.table.lock(|table| {
            let mut table = table.borrow_mut();
            table
                .slot_mut(id)
                .and_then(|slot| slot.mailbox.pop_front())
                .map(|delivery| delivery.buttons)
        })
    }

    /// Wait for the next event for `id`.
    ///
    /// Resolves to `None` once the listener is deregistered.
    pub async fn receive(
        &self,
        id: ListenerId,
    ) -> Option<ButtonSet> {
        self.receive_any(&[id]).await.map(|(_, buttons)| buttons)
    }

    /// Wait for the next event addressed to any of `ids`.
    ///
    /// Events already queued on several listeners are returned in the order
    /// they were emitted. Resolves to `None` once none of `ids` is registered.
    pub async fn receive_any(
        &self,
        ids: &[ListenerId],
    ) -> Option<(ListenerId, ButtonSet)> {
        poll_fn(|cx| {
            self.table.lock(|table| {
                let mut table = table.borrow_mut();

                let mut registered = false;
                let mut oldest: Option<(ListenerId, u32)> = None;
                for &id in ids {
                    let Some(slot) = table.slot(id) else {
                        continue;
                    };
                    registered = true;
                    if let Some(front) = slot.mailbox.front()
                        && oldest.is_none_or(|(_, stamp)| issued_before(front.stamp, stamp))
                    {
                        oldest = Some((id, front.stamp));
                    }
                }

                if !registered {
                    return Poll::Ready(None);
                }

                if let Some((id, _)) = oldest {
                    let delivery = table.slot_mut(id).and_then(|slot| slot.mailbox.pop_front());
                    return Poll::Ready(delivery.map(|d| (id, d.buttons)));
                }

                for &id in ids {
                    if let Some(slot) = table.slot_mut(id) {
                        slot.waker.register(cx.waker());
                    }
                }
                Poll::Pending
            })
        })
        .await
    }

    /// Number of listeners currently registered in `scope`.
    pub fn listener_count(
        &self,
        scope: Scope,
    ) -> usize {
        self.table.lock(|table| {
            table
                .borrow()
                .slots
                .iter()
                .flatten()
                .filter(|slot| slot.scope == scope)
                .count()
        })
    }
}

impl<M: RawMutex> Default for EventBus<M> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_futures::select::{Either, select};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;
    use crate::input::Button;

    const HOST: Scope = Scope(1);
    const OTHER: Scope = Scope(2);

    fn down(button: Button) -> ButtonEvent { ButtonEvent::Down(button.into()) }

    fn up(button: Button) -> ButtonEvent { ButtonEvent::Up(button.into()) }

    #[test]
    fn test_delivery_filters_scope_and_kind() {
        let bus = EventBus::<NoopRawMutex>::new();
        let downs = bus.register(EventKind::ButtonDown, HOST).unwrap();
        let ups = bus.register(EventKind::ButtonUp, HOST).unwrap();
        let foreign = bus.register(EventKind::ButtonDown, OTHER).unwrap();

        assert_eq!(bus.emit(HOST, down(Button::Confirm)), 1);

        assert_eq!(bus.try_receive(downs), Some(Button::Confirm.into()));
        assert_eq!(bus.try_receive(ups), None);
        assert_eq!(bus.try_receive(foreign), None);
    }

    #[test]
    fn test_deregister_frees_slot_once() {
        let bus = EventBus::<NoopRawMutex>::new();
        let id = bus.register(EventKind::ButtonDown, HOST).unwrap();
        assert_eq!(bus.listener_count(HOST), 1);

        assert!(bus.deregister(id));
        assert!(!bus.deregister(id));
        assert_eq!(bus.listener_count(HOST), 0);
        assert_eq!(bus.emit(HOST, down(Button::Left)), 0);
    }

    #[test]
    fn test_stale_id_does_not_read_reused_slot() {
        let bus = EventBus::<NoopRawMutex>::new();
        let old = bus.register(EventKind::ButtonDown, HOST).unwrap();
        bus.deregister(old);
        let new = bus.register(EventKind::ButtonDown, HOST).unwrap();
        assert_ne!(old, new);

        bus.emit(HOST, down(Button::Right));
        assert_eq!(bus.try_receive(old), None);
        assert!(!bus.deregister(old));
        assert_eq!(bus.try_receive(new), Some(Button::Right.into()));
    }

    #[test]
    fn test_table_full() {
        let bus = EventBus::<NoopRawMutex>::new();
        for _ in 0..MAX_LISTENERS {
            bus.register(EventKind::ButtonUp, HOST).unwrap();
        }
        assert_eq!(bus.register(EventKind::ButtonUp, HOST), Err(Error::ListenerTableFull));
    }

    #[test]
    fn test_full_mailbox_drops_oldest() {
        let bus = EventBus::<NoopRawMutex>::new();
        let id = bus.register(EventKind::ButtonDown, HOST).unwrap();

        bus.emit(HOST, down(Button::Confirm));
        for _ in 0..MAILBOX_DEPTH {
            bus.emit(HOST, down(Button::Left));
        }

        for _ in 0..MAILBOX_DEPTH {
            assert_eq!(bus.try_receive(id), Some(Button::Left.into()));
        }
        assert_eq!(bus.try_receive(id), None);
    }

    #[test]
    fn test_dropped_events_are_counted() {
        let bus = EventBus::<NoopRawMutex>::new();
        let id = bus.register(EventKind::ButtonDown, HOST).unwrap();
        let other = bus.register(EventKind::ButtonDown, HOST).unwrap();
        let dropped = || bus.table.lock(|table| table.borrow().dropped);

        for _ in 0..MAILBOX_DEPTH {
            bus.emit(HOST, down(Button::Right));
        }
        assert_eq!(dropped(), 0);

        // Both mailboxes overflow, both still receive the new event
        assert_eq!(bus.emit(HOST, down(Button::Left)), 2);
        assert_eq!(dropped(), 2);

        for _ in 0..MAILBOX_DEPTH - 1 {
            assert_eq!(bus.try_receive(id), Some(Button::Right.into()));
        }
        assert_eq!(bus.try_receive(id), Some(Button::Left.into()));
        assert_eq!(bus.try_receive(other), Some(Button::Right.into()));
    }

    #[test]
    fn test_receive_any_preserves_emission_order() {
        let bus = EventBus::<NoopRawMutex>::new();
        let downs = bus.register(EventKind::ButtonDown, HOST).unwrap();
        let ups = bus.register(EventKind::ButtonUp, HOST).unwrap();

        bus.emit(HOST, up(Button::Up));
        bus.emit(HOST, down(Button::Up));
        bus.emit(HOST, up(Button::Down));

        let ids = [downs, ups];
        assert_eq!(block_on(bus.receive_any(&ids)), Some((ups, Button::Up.into())));
        assert_eq!(block_on(bus.receive_any(&ids)), Some((downs, Button::Up.into())));
        assert_eq!(block_on(bus.receive_any(&ids)), Some((ups, Button::Down.into())));
    }

    #[test]
    fn test_receive_resolves_none_after_deregister() {
        let bus = EventBus::<NoopRawMutex>::new();
        let id = bus.register(EventKind::ButtonDown, HOST).unwrap();

        let result = block_on(async {
            let deregister = async {
                embassy_futures::yield_now().await;
                bus.deregister(id);
                core::future::pending::<()>().await;
            };
            select(bus.receive(id), deregister).await
        });
        assert!(matches!(result, Either::First(None)));
    }

    #[test]
    fn test_receive_waits_for_emit() {
        let bus = EventBus::<NoopRawMutex>::new();
        let id = bus.register(EventKind::ButtonDown, HOST).unwrap();

        let result = block_on(async {
            let emit = async {
                embassy_futures::yield_now().await;
                bus.emit(HOST, down(Button::Cancel));
                core::future::pending::<()>().await;
            };
            select(bus.receive(id), emit).await
        });
        assert!(matches!(result, Either::First(Some(set)) if set.contains(Button::Cancel)));
    }
}
