//! Behaviour coverage for the notes service.

use std::sync::Arc;

use rstest::rstest;

use crate::domain::note::Note;
use crate::domain::{Error, ErrorCode, Identity, NoteDraft, NotesService, UserId};
use crate::outbound::persistence::MemoryNoteRepository;

fn service() -> NotesService {
    NotesService::new(Arc::new(MemoryNoteRepository::new()))
}

fn draft(title: &str, text: &str, slug: Option<&str>) -> NoteDraft {
    NoteDraft {
        title: title.to_owned(),
        text: text.to_owned(),
        slug: slug.map(str::to_owned),
    }
}

fn assert_invalid_field(err: &Error, field: &str, code: &str) {
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().and_then(|v| v.as_object()).expect("details");
    assert_eq!(details.get("field").and_then(|v| v.as_str()), Some(field));
    assert_eq!(details.get("code").and_then(|v| v.as_str()), Some(code));
}

async fn create(service: &NotesService, identity: &Identity, title: &str) -> Note {
    service
        .create(identity, draft(title, "Текст", None))
        .await
        .expect("create succeeds")
}

#[actix_rt::test]
async fn anonymous_callers_get_the_not_authenticated_outcome() {
    let service = service();
    let anonymous = Identity::Anonymous;

    let list_err = service.list(&anonymous).await.expect_err("list must fail");
    assert_eq!(list_err.code(), ErrorCode::Unauthorized);

    let create_err = service
        .create(&anonymous, draft("Заголовок", "Текст", None))
        .await
        .expect_err("create must fail");
    assert_eq!(create_err.code(), ErrorCode::Unauthorized);
}

#[actix_rt::test]
async fn created_notes_derive_transliterated_slugs() {
    let service = service();
    let author = Identity::User(UserId::random());

    let note = create(&service, &author, "Заголовок").await;
    assert_eq!(note.slug().as_ref(), "zagolovok");
}

#[actix_rt::test]
async fn derived_slug_collisions_get_counter_suffixes() {
    let service = service();
    let author = Identity::User(UserId::random());

    let first = create(&service, &author, "Заголовок").await;
    let second = create(&service, &author, "Заголовок").await;
    let third = create(&service, &author, "Заголовок").await;

    assert_eq!(first.slug().as_ref(), "zagolovok");
    assert_eq!(second.slug().as_ref(), "zagolovok-2");
    assert_eq!(third.slug().as_ref(), "zagolovok-3");
}

#[actix_rt::test]
async fn explicit_duplicate_slugs_are_rejected_without_side_effects() {
    let service = service();
    let author = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let err = service
        .create(&author, draft("New title", "Текст", Some("zagolovok")))
        .await
        .expect_err("duplicate slug must fail");
    assert_invalid_field(&err, "slug", "duplicate_slug");

    let notes = service.list(&author).await.expect("list succeeds");
    assert_eq!(notes.len(), 1);
}

#[rstest]
#[case("Not A Slug")]
#[case("päivä")]
#[actix_rt::test]
async fn malformed_explicit_slugs_are_rejected(#[case] raw: &str) {
    let service = service();
    let author = Identity::User(UserId::random());

    let err = service
        .create(&author, draft("Заголовок", "Текст", Some(raw)))
        .await
        .expect_err("malformed slug must fail");
    assert_invalid_field(&err, "slug", "invalid_slug");
}

#[actix_rt::test]
async fn listing_is_scoped_to_the_caller() {
    let service = service();
    let author = Identity::User(UserId::random());
    let reader = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let own = service.list(&author).await.expect("list succeeds");
    assert_eq!(own.len(), 1);
    let others = service.list(&reader).await.expect("list succeeds");
    assert!(others.is_empty());
}

#[actix_rt::test]
async fn non_owners_cannot_distinguish_existing_from_absent_notes() {
    let service = service();
    let author = Identity::User(UserId::random());
    let reader = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let existing = service
        .view(&reader, "zagolovok")
        .await
        .expect_err("non-owner view must fail");
    let absent = service
        .view(&reader, "no-such-note")
        .await
        .expect_err("absent view must fail");
    assert_eq!(existing, absent);
    assert_eq!(existing.code(), ErrorCode::NotFound);
}

#[actix_rt::test]
async fn owner_edits_replace_title_text_and_slug_atomically() {
    let service = service();
    let author = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let updated = service
        .edit(
            &author,
            "zagolovok",
            draft("Title in english", "Text in english", None),
        )
        .await
        .expect("edit succeeds");
    assert_eq!(updated.title().as_ref(), "Title in english");
    assert_eq!(updated.text(), "Text in english");
    assert_eq!(updated.slug().as_ref(), "title-in-english");

    // The old slug no longer resolves.
    let err = service
        .view(&author, "zagolovok")
        .await
        .expect_err("old slug must be gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[actix_rt::test]
async fn editing_with_unchanged_title_keeps_the_slug() {
    let service = service();
    let author = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let updated = service
        .edit(&author, "zagolovok", draft("Заголовок", "Новый текст", None))
        .await
        .expect("edit succeeds");
    assert_eq!(updated.slug().as_ref(), "zagolovok");
}

#[actix_rt::test]
async fn colliding_edits_mutate_nothing() {
    let service = service();
    let author = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;
    create(&service, &author, "Другая").await;

    let err = service
        .edit(
            &author,
            "drugaia",
            draft("Другая", "Текст", Some("zagolovok")),
        )
        .await
        .expect_err("slug collision must fail");
    assert_invalid_field(&err, "slug", "duplicate_slug");

    let untouched = service
        .view(&author, "drugaia")
        .await
        .expect("original note still resolves");
    assert_eq!(untouched.text(), "Текст");
}

#[actix_rt::test]
async fn non_owner_edits_and_deletes_are_concealed_no_ops() {
    let service = service();
    let author = Identity::User(UserId::random());
    let reader = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    let edit_err = service
        .edit(
            &reader,
            "zagolovok",
            draft("Title in english", "Text in english", None),
        )
        .await
        .expect_err("non-owner edit must fail");
    assert_eq!(edit_err.code(), ErrorCode::NotFound);

    let delete_err = service
        .delete(&reader, "zagolovok")
        .await
        .expect_err("non-owner delete must fail");
    assert_eq!(delete_err.code(), ErrorCode::NotFound);

    let note = service
        .view(&author, "zagolovok")
        .await
        .expect("note survives unmutated");
    assert_eq!(note.title().as_ref(), "Заголовок");
    assert_eq!(note.text(), "Текст");
}

#[actix_rt::test]
async fn owners_can_delete_their_notes() {
    let service = service();
    let author = Identity::User(UserId::random());
    create(&service, &author, "Заголовок").await;

    service
        .delete(&author, "zagolovok")
        .await
        .expect("delete succeeds");
    let notes = service.list(&author).await.expect("list succeeds");
    assert!(notes.is_empty());
}
