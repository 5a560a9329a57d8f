//! The per-connection record registered with the hub.
//!
//! A connection is represented by two halves created together:
//!
//! - [`ClientHandle`] is moved into the hub's registry. It owns the only
//!   sender of the outbound queue, so dropping the handle is what closes the
//!   queue. Nothing outside the hub can write to a queue after removal.
//! - [`OutboundQueue`] stays with the connection and is drained by the
//!   write pump.

use axum::body::Bytes;
use tokio::sync::mpsc::{
    self,
    error::{TryRecvError, TrySendError},
};

use super::{ClientId, error::DeliveryError, factory::ClientIdFactory};

/// Opaque message payload passed through the hub untouched.
pub type Payload = Bytes;

/// Hub-side half of a connected client.
#[derive(Debug)]
pub struct ClientHandle {
    id: ClientId,
    sender: mpsc::Sender<Payload>,
}

impl ClientHandle {
    /// Create a handle with a fresh id and an outbound queue of `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. `HubConfig::validate` rejects that value.
    pub fn new(capacity: usize) -> (Self, OutboundQueue) {
        Self::with_id(ClientIdFactory::generate(), capacity)
    }

    /// Same as [`ClientHandle::new`] with a caller-chosen id.
    pub fn with_id(id: ClientId, capacity: usize) -> (Self, OutboundQueue) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { id, sender }, OutboundQueue { id, receiver })
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Try to enqueue `payload` without waiting.
    pub fn offer(&self, payload: Payload) -> Result<(), DeliveryError> {
        self.sender.try_send(payload).map_err(|err| match err {
            TrySendError::Full(_) => DeliveryError::QueueFull,
            TrySendError::Closed(_) => DeliveryError::QueueClosed,
        })
    }
}

/// Connection-side half: the receiving end of a client's outbound queue.
#[derive(Debug)]
pub struct OutboundQueue {
    id: ClientId,
    receiver: mpsc::Receiver<Payload>,
}

impl OutboundQueue {
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Wait for the next payload.
    ///
    /// Returns `None` once the hub has dropped the matching [`ClientHandle`]
    /// and every payload queued before that has been taken.
    pub async fn recv(&mut self) -> Option<Payload> {
        self.receiver.recv().await
    }

    /// Take a payload if one is ready, without waiting.
    pub fn try_recv(&mut self) -> Result<Payload, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Number of payloads waiting to be written.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_until_full() {
        // テスト項目: 容量を超えるとキューが満杯エラーになる
        // given (前提条件):
        let (handle, queue) = ClientHandle::new(2);

        // when (操作):
        let first = handle.offer(Payload::from_static(b"a"));
        let second = handle.offer(Payload::from_static(b"b"));
        let third = handle.offer(Payload::from_static(b"c"));

        // then (期待する結果):
        assert_eq!(first, Ok(()));
        assert_eq!(second, Ok(()));
        assert_eq!(third, Err(DeliveryError::QueueFull));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_offer_after_receiver_dropped() {
        // テスト項目: 受信側が破棄されたキューへの送信はクローズエラーになる
        // given (前提条件):
        let (handle, queue) = ClientHandle::new(4);
        drop(queue);

        // when (操作):
        let result = handle.offer(Payload::from_static(b"a"));

        // then (期待する結果):
        assert_eq!(result, Err(DeliveryError::QueueClosed));
    }

    #[tokio::test]
    async fn test_dropping_handle_closes_queue_after_drain() {
        // テスト項目: ハンドル破棄後も送信済みのメッセージは受信でき、その後 None になる
        // given (前提条件):
        let (handle, mut queue) = ClientHandle::new(4);
        handle.offer(Payload::from_static(b"hello")).unwrap();

        // when (操作):
        drop(handle);

        // then (期待する結果):
        assert_eq!(queue.recv().await, Some(Payload::from_static(b"hello")));
        assert_eq!(queue.recv().await, None);
        assert_eq!(queue.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_halves_share_id() {
        // テスト項目: ハンドルとキューが同じ ClientId を持つ
        // when (操作):
        let (handle, queue) = ClientHandle::new(1);

        // then (期待する結果):
        assert_eq!(handle.id(), queue.id());
    }
}
