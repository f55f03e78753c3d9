//! Library integration tests over both storage backends

use readpace_core::chunker::chunk;
use readpace_core::library::PROGRESS_KEY;
use readpace_core::storage::{LocalStorage, MemoryStorage, StorageProvider};
use readpace_core::text::normalize;
use readpace_core::{ChunkRecord, ChunkSettings, Library, ProgressState};
use std::sync::Arc;

fn memory_library() -> Arc<Library> {
    Arc::new(Library::new(Arc::new(MemoryStorage::new())))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_advances_lose_no_increments() {
    let library = memory_library();
    library.set_total_units("book.txt", 100).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let library = Arc::clone(&library);
            tokio::spawn(async move { library.advance("book.txt", 100).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let progress = library.progress("book.txt").await.unwrap();
    assert_eq!(progress.current_unit, 32);
    assert_eq!(progress.reading_days, 32);
    assert!(!progress.completed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_advances_on_different_books() {
    let library = memory_library();

    let handles: Vec<_> = (0..8)
        .flat_map(|_| ["a.txt", "b.txt"])
        .map(|book| {
            let library = Arc::clone(&library);
            tokio::spawn(async move { library.advance(book, 5).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stats = library.statistics().await.unwrap();
    assert_eq!(stats.completed_books, 2);
    assert_eq!(stats.active_books, 0);
    assert_eq!(stats.total_reading_days, 10);
}

#[tokio::test]
async fn three_unit_book_on_local_storage() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(LocalStorage::new(dir.path()));
    let library = Library::new(storage.clone());

    let settings = ChunkSettings::new(0.5, 4);
    let text = normalize("one two\n\n\n\nthree four\n\n  five   six  ");
    let sequence = chunk(&text, settings.target_minutes, settings.words_per_minute)
        .with_title("bookA");
    assert_eq!(sequence.len(), 3);

    let record = ChunkRecord::new(&sequence, settings);
    library.save_chunks("bookA.txt", &record).await.unwrap();
    library.set_total_units("bookA.txt", record.len()).await.unwrap();

    let states: Vec<_> = {
        let mut states = Vec::new();
        for _ in 0..3 {
            states.push(library.advance("bookA.txt", record.len()).await.unwrap().state());
        }
        states
    };
    assert_eq!(
        states,
        vec![
            ProgressState::InProgress,
            ProgressState::InProgress,
            ProgressState::Completed
        ]
    );

    // A fresh library over the same directory sees the persisted state
    let reopened = Library::new(Arc::new(LocalStorage::new(dir.path())));
    let progress = reopened.progress("bookA.txt").await.unwrap();
    assert_eq!(progress.current_unit, 3);
    assert_eq!(progress.reading_days, 3);
    assert!(progress.completed);

    let loaded = reopened.load_chunks("bookA.txt").await.unwrap().unwrap();
    assert_eq!(loaded.unit(2).unwrap().content(), "five six");
    assert_eq!(reopened.processed_books().await.unwrap(), vec!["bookA".to_string()]);

    assert!(dir.path().join("bookA_chunks.json").exists());
    assert!(!dir.path().join("progress.json.tmp").exists());

    let raw = storage.read(PROGRESS_KEY).await.unwrap();
    let stored: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    insta::assert_json_snapshot!(stored, @r###"
    {
      "books": {
        "bookA.txt": {
          "completed": true,
          "current_chunk": 3,
          "reading_days": 3,
          "total_chunks": 3
        }
      }
    }
    "###);
}

#[tokio::test]
async fn chunk_record_shape() {
    let settings = ChunkSettings::new(0.5, 4);
    let sequence = chunk("one two three\n\nfour five", 0.5, 4).with_title("novel");
    let record = ChunkRecord::new(&sequence, settings);

    insta::assert_json_snapshot!(record, @r###"
    {
      "title": "novel",
      "chunks": [
        {
          "index": 0,
          "content": "one two three",
          "word_count": 3,
          "estimated_reading_time": 0.75
        },
        {
          "index": 1,
          "content": "four five",
          "word_count": 2,
          "estimated_reading_time": 0.5
        }
      ],
      "total_chunks": 2,
      "total_words": 5,
      "total_reading_time": 1.25,
      "settings": {
        "target_minutes": 0.5,
        "words_per_minute": 4
      }
    }
    "###);
}

#[tokio::test]
async fn legacy_record_without_settings_loads() {
    let storage = Arc::new(MemoryStorage::new());
    let legacy = br#"{
        "title": "old",
        "chunks": [{"index": 0, "content": "hi", "word_count": 1, "estimated_reading_time": 0.005}],
        "total_chunks": 1,
        "total_words": 1,
        "total_reading_time": 0.005
    }"#;
    storage.write("old_chunks.json", legacy.to_vec()).await.unwrap();

    let library = Library::new(storage);
    let record = library.load_chunks("old.txt").await.unwrap().unwrap();
    assert_eq!(record.settings, None);
    assert!(record.matches_settings(&ChunkSettings::default()));
    assert_eq!(record.unit(0).unwrap().content(), "hi");
}

#[tokio::test]
async fn missing_storage_root_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::new(Arc::new(LocalStorage::new(dir.path().join("absent"))));

    assert!(library.tracker().await.unwrap().is_empty());
    assert!(library.processed_books().await.unwrap().is_empty());
    assert!(library.load_chunks("x.txt").await.unwrap().is_none());
}
