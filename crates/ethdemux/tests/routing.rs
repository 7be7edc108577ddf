//! Routing semantics: keyed handlers, the default handler, and the legacy
//! length range.

use std::time::Duration;

use ethdemux::{Demux, DemuxError};
use ethdemux_frame::{EtherType, Frame};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

/// A handler that forwards every frame it consumes to a test channel.
fn tap() -> (
    impl Fn(Frame) + Send + Sync + 'static,
    mpsc::UnboundedReceiver<Frame>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        move |frame: Frame| {
            let _ = tx.send(frame);
        },
        rx,
    )
}

async fn recv_one(rx: &mut mpsc::UnboundedReceiver<Frame>) -> Frame {
    timeout(WAIT, rx.recv())
        .await
        .expect("handler should be invoked promptly")
        .expect("tap channel should stay open")
}

#[tokio::test]
async fn registered_ethertype_goes_to_its_handler() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, mut default_rx) = tap();
    let (ipv4_handler, mut ipv4_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);
    demux.set_handler(EtherType::IPV4, ipv4_handler).unwrap();

    frames
        .send(Frame::new(EtherType::IPV4, &b"v4 payload"[..]))
        .await
        .unwrap();

    let received = recv_one(&mut ipv4_rx).await;
    assert_eq!(received.ether_type, EtherType::IPV4);
    assert_eq!(received.payload.as_ref(), b"v4 payload");

    drop(frames);
    timeout(WAIT, demux.closed()).await.unwrap();
    assert!(default_rx.try_recv().is_err(), "default must not be invoked");
    assert!(ipv4_rx.try_recv().is_err(), "handler must run exactly once");
}

#[tokio::test]
async fn unregistered_ethertype_goes_to_default() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, mut default_rx) = tap();

    let _demux = Demux::new(frame_rx, default_handler);

    frames
        .send(Frame::new(EtherType::ARP, &b"who-has"[..]))
        .await
        .unwrap();

    let received = recv_one(&mut default_rx).await;
    assert_eq!(received.ether_type, EtherType::ARP);
}

#[tokio::test]
async fn length_range_value_goes_to_default() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, mut default_rx) = tap();

    let _demux = Demux::new(frame_rx, default_handler);

    frames
        .send(Frame::new(EtherType::new(0x0012), &b"legacy"[..]))
        .await
        .unwrap();

    let received = recv_one(&mut default_rx).await;
    assert_eq!(received.ether_type, EtherType::new(0x0012));
}

#[tokio::test]
async fn length_range_registration_is_rejected_and_routing_unchanged() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, mut default_rx) = tap();
    let (rejected_handler, mut rejected_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);

    let err = demux
        .set_handler(EtherType::new(0x0005), rejected_handler)
        .unwrap_err();
    assert_eq!(err, DemuxError::LengthEtherType(EtherType::new(0x0005)));

    frames
        .send(Frame::new(EtherType::new(0x0005), &b""[..]))
        .await
        .unwrap();

    let received = recv_one(&mut default_rx).await;
    assert_eq!(received.ether_type, EtherType::new(0x0005));
    assert!(rejected_rx.try_recv().is_err());
}

#[tokio::test]
async fn mixed_traffic_scenario() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, mut default_rx) = tap();
    let (ipv4_handler, mut ipv4_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);
    demux.set_handler(EtherType::new(0x0800), ipv4_handler).unwrap();

    for frame in [
        Frame::new(EtherType::new(0x0800), &b"ip"[..]),
        Frame::new(EtherType::new(0x0806), &b"arp"[..]),
        Frame::new(EtherType::new(0x0012), &b"len"[..]),
    ] {
        frames.send(frame).await.unwrap();
    }

    assert_eq!(recv_one(&mut ipv4_rx).await.payload.as_ref(), b"ip");

    // Handler completions are unordered across tasks; compare as a set.
    let mut defaulted = vec![
        recv_one(&mut default_rx).await.ether_type,
        recv_one(&mut default_rx).await.ether_type,
    ];
    defaulted.sort();
    assert_eq!(
        defaulted,
        vec![EtherType::new(0x0012), EtherType::new(0x0806)]
    );
}

#[tokio::test]
async fn reregistration_routes_to_new_handler() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, _default_rx) = tap();
    let (old_handler, mut old_rx) = tap();
    let (new_handler, mut new_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);
    demux.set_handler(EtherType::IPV6, old_handler).unwrap();
    demux.set_handler(EtherType::IPV6, new_handler).unwrap();

    frames
        .send(Frame::new(EtherType::IPV6, &b"v6"[..]))
        .await
        .unwrap();

    assert_eq!(recv_one(&mut new_rx).await.payload.as_ref(), b"v6");
    assert!(old_rx.try_recv().is_err());
}

#[tokio::test]
async fn every_frame_is_delivered_exactly_once() {
    let (frames, frame_rx) = mpsc::channel(64);
    let (default_handler, mut default_rx) = tap();
    let (ipv4_handler, mut ipv4_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);
    demux.set_handler(EtherType::IPV4, ipv4_handler).unwrap();

    for i in 0..100u8 {
        frames
            .send(Frame::new(EtherType::IPV4, vec![i]))
            .await
            .unwrap();
    }
    drop(frames);

    for _ in 0..100 {
        recv_one(&mut ipv4_rx).await;
    }

    timeout(WAIT, demux.closed()).await.unwrap();
    assert!(ipv4_rx.try_recv().is_err());
    assert!(default_rx.try_recv().is_err());
}

#[tokio::test]
async fn handler_may_register_handlers_from_inside_an_invocation() {
    let (frames, frame_rx) = mpsc::channel(8);
    let (default_handler, _default_rx) = tap();

    let demux = Demux::new(frame_rx, default_handler);

    let (ipv6_tx, mut ipv6_rx) = mpsc::unbounded_channel();
    let (registered_tx, mut registered_rx) = mpsc::unbounded_channel();
    let inner = demux.clone();
    demux
        .set_handler(EtherType::ARP, move |frame: Frame| {
            let tx = ipv6_tx.clone();
            inner
                .set_handler(EtherType::IPV6, move |frame: Frame| {
                    let _ = tx.send(frame);
                })
                .unwrap();
            let _ = registered_tx.send(frame);
        })
        .unwrap();

    frames
        .send(Frame::new(EtherType::ARP, &b"arp"[..]))
        .await
        .unwrap();
    timeout(WAIT, registered_rx.recv())
        .await
        .unwrap()
        .unwrap();

    frames
        .send(Frame::new(EtherType::IPV6, &b"v6"[..]))
        .await
        .unwrap();
    assert_eq!(recv_one(&mut ipv6_rx).await.payload.as_ref(), b"v6");
}
