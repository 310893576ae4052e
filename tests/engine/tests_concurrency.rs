//! Sessions serialize mutation and share reads: concurrent mapping never
//! observes an intermediate state, and independent sessions do not
//! interfere.

use std::sync::Arc;
use std::thread;

use easel::session::EditorSession;
use easel::Representation;

use crate::helpers::operation_fixtures::*;

#[test]
fn test_concurrent_reads_during_writes() {
    let (session, classes) = session_with_classes(1);
    let session = Arc::new(session);
    let subject = classes[0].clone();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            let subject = subject.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    // The subject exists for the whole test; every read
                    // must see a complete, mappable element.
                    let node = session.map_element(&subject).expect("mapping must succeed");
                    assert_eq!(node.id, subject);
                }
            })
        })
        .collect();

    for i in 0..20 {
        session
            .process(&create_node("class", Some(&format!("W{i}")), None))
            .expect("writer operation");
    }

    for reader in readers {
        reader.join().expect("reader thread");
    }
    // 1 root + 1 subject + 20 writes.
    assert_eq!(session.with_document(|d| d.len()), 22);
}

#[test]
fn test_parallel_sessions_share_nothing() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let session = EditorSession::new(Representation::Class);
                for i in 0..10 {
                    session
                        .process(&create_node("class", Some(&format!("C{i}")), None))
                        .unwrap();
                }
                session.with_document(|d| d.len())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("session thread"), 11);
    }
}
