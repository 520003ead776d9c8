//! Behavioral tests for the confirmation pipeline, run against an
//! in-memory source and the recording mailer — no database, no SMTP.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::time::Duration;
use tnt_core::ids::{
    AdventureStyleId, ContactMessageId, CountryId, TourId, TravellerId, VisitingId,
};
use tnt_core::{ContactMessage, Money, PricingPolicy, Tour, Traveller, TravellerCount, Visiting};
use tnt_mailer::RecordingMailer;
use tnt_pipeline::{BookingSource, ConfirmationPipeline, Job, PipelineConfig};
use tnt_queue::{JobHandler, JobQueue, RetryPolicy, TaskOutcome, Worker};
use tnt_store::ConfirmationView;

// ============================================================================
// Fixtures
// ============================================================================

fn sample_view(visiting_id: VisitingId) -> ConfirmationView {
    let traveller_id = TravellerId::new();
    let tour_id = TourId::new();
    ConfirmationView {
        visiting: Visiting {
            id: visiting_id,
            request_country: "Germany".to_string(),
            traveller_id,
            tour_id,
            booked_on: Utc.with_ymd_and_hms(2025, 11, 5, 14, 30, 0).unwrap(),
            notes: String::new(),
        },
        traveller: Traveller {
            id: traveller_id,
            name: "Asha Rao".to_string(),
            phone: "+12025550123".to_string(),
            email: "asha@example.com".to_string(),
            nationality: "India".to_string(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 12, 8).unwrap(),
            hotel_rating: 4,
            is_direct_flight: true,
        },
        tour: Tour {
            id: tour_id,
            title: "Serengeti Safari Week".to_string(),
            country_id: CountryId::new(),
            days: 8,
            nights: 7,
            rating: Some(5),
            review_count: 320,
            price: Some(Money::from_cents(250_000)),
            discount_percent: Some(10.0),
            departure_date: NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
            adventure_style_id: AdventureStyleId::new(),
            start_city: "Arusha".to_string(),
            end_city: "Arusha".to_string(),
        },
        tour_country: "Tanzania".to_string(),
        adventure_style: "Safari".to_string(),
        destinations: vec![
            "Ngorongoro Crater".to_string(),
            "Serengeti National Park".to_string(),
        ],
    }
}

/// In-memory [`BookingSource`] with scriptable failures.
#[derive(Default)]
struct FakeSource {
    view: Option<ConfirmationView>,
    count: Option<TravellerCount>,
    fail_count_read: bool,
    contact: Option<ContactMessage>,
}

#[async_trait]
impl BookingSource for FakeSource {
    async fn confirmation_view(
        &self,
        _id: VisitingId,
    ) -> anyhow::Result<Option<ConfirmationView>> {
        Ok(self.view.clone())
    }

    async fn traveller_count(
        &self,
        _id: TravellerId,
    ) -> anyhow::Result<Option<TravellerCount>> {
        if self.fail_count_read {
            anyhow::bail!("count table unreachable");
        }
        Ok(self.count)
    }

    async fn contact_message(
        &self,
        _id: ContactMessageId,
    ) -> anyhow::Result<Option<ContactMessage>> {
        Ok(self.contact.clone())
    }
}

fn pipeline_with(
    source: FakeSource,
    mailer: RecordingMailer,
) -> ConfirmationPipeline<FakeSource, RecordingMailer> {
    ConfirmationPipeline::new(
        source,
        mailer,
        PipelineConfig::default(),
        PricingPolicy::default(),
    )
}

fn booking_job(id: VisitingId) -> Job {
    Job::SendBookingConfirmation { visiting_id: id }
}

// ============================================================================
// Outcome classification
// ============================================================================

#[tokio::test]
async fn happy_path_sends_and_completes() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let outcome = pipeline.handle(&booking_job(id), 0).await;
    assert!(matches!(outcome, TaskOutcome::Completed(_)));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, vec!["asha@example.com".to_string()]);
    assert_eq!(email.cc, vec!["bookings@tossntrips.com".to_string()]);
    assert_eq!(email.from, "noreply@tossntrips.com");
    assert_eq!(
        email.subject,
        "Booking Received: Serengeti Safari Week - Toss & Trips"
    );
    assert!(!email.text_body.contains('<'));
}

#[tokio::test]
async fn missing_booking_aborts_without_sending() {
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(FakeSource::default(), mailer.clone());

    let outcome = pipeline.handle(&booking_job(VisitingId::new()), 0).await;
    assert!(matches!(outcome, TaskOutcome::Abort(_)));
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn mail_failure_requests_retry() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::fail_times(u32::MAX);
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let outcome = pipeline.handle(&booking_job(id), 0).await;
    assert!(matches!(outcome, TaskOutcome::Retry(_)));
    assert_eq!(mailer.sent_count(), 0);
}

// ============================================================================
// Context fallbacks
// ============================================================================

#[tokio::test]
async fn pricing_is_derived_from_base_and_discount() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    let html = &mailer.sent()[0].html_body;
    // $2,500.00 base at 10% off
    assert!(html.contains("$2,500.00"));
    assert!(html.contains("10%"));
    assert!(html.contains("$2,250.00"));
}

#[tokio::test]
async fn absent_price_renders_no_amounts() {
    let id = VisitingId::new();
    let mut view = sample_view(id);
    view.tour.price = None;
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(view),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    let html = &mailer.sent()[0].html_body;
    assert!(!html.contains('$'));
    assert!(html.contains("confirmed separately"));
}

#[tokio::test]
async fn missing_count_falls_back_to_one_adult() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            count: None,
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    assert!(mailer.sent()[0].html_body.contains("1 Adult"));
}

#[tokio::test]
async fn unreadable_count_still_sends_with_fallback() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            fail_count_read: true,
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let outcome = pipeline.handle(&booking_job(id), 0).await;
    assert!(matches!(outcome, TaskOutcome::Completed(_)));
    assert!(mailer.sent()[0].html_body.contains("1 Adult"));
}

#[tokio::test]
async fn present_count_renders_breakdown() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            count: Some(TravellerCount {
                adults: 2,
                children: 1,
                infants: 0,
            }),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    assert!(mailer.sent()[0].html_body.contains("2 adults, 1 child"));
}

#[tokio::test]
async fn zero_destinations_render_various_destinations() {
    let id = VisitingId::new();
    let mut view = sample_view(id);
    view.destinations.clear();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(view),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    assert!(mailer.sent()[0].html_body.contains("Various destinations"));
}

#[tokio::test]
async fn nights_and_dates_use_us_format() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    let html = &mailer.sent()[0].html_body;
    assert!(html.contains("12/01/2025"));
    assert!(html.contains("12/08/2025"));
    assert!(html.contains(">7<")); // nights cell
    assert!(html.contains("11/05/2025 at 02:30 PM"));
}

// ============================================================================
// Idempotency
// ============================================================================

#[tokio::test]
async fn rerunning_the_same_booking_produces_identical_html() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    pipeline.handle(&booking_job(id), 0).await;

    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].html_body.as_bytes(), sent[1].html_body.as_bytes());
}

// ============================================================================
// Logo embedding
// ============================================================================

#[tokio::test]
async fn missing_logo_sends_without_inline_image() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::new();
    let config = PipelineConfig {
        assets_dir: std::env::temp_dir().join(format!("tnt-no-assets-{id}")),
        ..PipelineConfig::default()
    };
    let pipeline = ConfirmationPipeline::new(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
        config,
        PricingPolicy::default(),
    );

    let outcome = pipeline.handle(&booking_job(id), 0).await;
    assert!(matches!(outcome, TaskOutcome::Completed(_)));
    assert!(mailer.sent()[0].inline_image.is_none());
}

#[tokio::test]
async fn present_logo_is_embedded_under_the_fixed_content_id() {
    let id = VisitingId::new();
    let assets = std::env::temp_dir().join(format!("tnt-assets-{id}"));
    std::fs::create_dir_all(&assets).unwrap();
    std::fs::write(assets.join("logo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();

    let mailer = RecordingMailer::new();
    let config = PipelineConfig {
        assets_dir: assets.clone(),
        ..PipelineConfig::default()
    };
    let pipeline = ConfirmationPipeline::new(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
        config,
        PricingPolicy::default(),
    );

    pipeline.handle(&booking_job(id), 0).await;
    let sent = mailer.sent();
    let image = sent[0].inline_image.as_ref().unwrap();
    assert_eq!(image.content_id, "logo");
    assert_eq!(image.content_type, "image/png");

    std::fs::remove_dir_all(assets).ok();
}

// ============================================================================
// Contact side channel
// ============================================================================

#[tokio::test]
async fn contact_thank_you_sends_to_submitter() {
    let message_id = ContactMessageId::new();
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(
        FakeSource {
            contact: Some(ContactMessage {
                id: message_id,
                full_name: "Jonas Weber".to_string(),
                email: "jonas@example.com".to_string(),
                subject: "Group discounts".to_string(),
                message: "Do you offer discounts for groups of 10?".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).unwrap(),
            }),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let job = Job::SendContactThankYou {
        contact_message_id: message_id,
    };
    let outcome = pipeline.handle(&job, 0).await;
    assert!(matches!(outcome, TaskOutcome::Completed(_)));

    let sent = mailer.sent();
    assert_eq!(sent[0].to, vec!["jonas@example.com".to_string()]);
    assert!(sent[0].html_body.contains("Group discounts"));
    assert!(sent[0].inline_image.is_none());
}

#[tokio::test]
async fn deleted_contact_message_aborts() {
    let mailer = RecordingMailer::new();
    let pipeline = pipeline_with(FakeSource::default(), mailer.clone());

    let job = Job::SendContactThankYou {
        contact_message_id: ContactMessageId::new(),
    };
    assert!(matches!(
        pipeline.handle(&job, 0).await,
        TaskOutcome::Abort(_)
    ));
    assert_eq!(mailer.sent_count(), 0);
}

// ============================================================================
// End-to-end through the worker
// ============================================================================

fn fast_policy() -> RetryPolicy {
    RetryPolicy::builder()
        .initial_delay(Duration::from_millis(5))
        .max_delay(Duration::from_millis(50))
        .build()
}

#[tokio::test]
async fn transport_failing_twice_succeeds_on_third_attempt() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::fail_times(2);
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let (queue, receiver) = JobQueue::new();
    let worker = Worker::new(pipeline, fast_policy(), queue.clone(), receiver);
    let running = tokio::spawn(worker.run());

    queue.enqueue(booking_job(id)).unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(mailer.sent_count(), 1);
    running.abort();
}

#[tokio::test]
async fn transport_failing_every_attempt_exhausts_after_three_retries() {
    let id = VisitingId::new();
    let mailer = RecordingMailer::fail_times(u32::MAX);
    let pipeline = pipeline_with(
        FakeSource {
            view: Some(sample_view(id)),
            ..FakeSource::default()
        },
        mailer.clone(),
    );

    let (queue, receiver) = JobQueue::new();
    let worker = Worker::new(pipeline, fast_policy(), queue.clone(), receiver);
    let running = tokio::spawn(worker.run());

    queue.enqueue(booking_job(id)).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Initial attempt + 3 retries, nothing delivered, job dropped.
    assert_eq!(mailer.sent_count(), 0);
    running.abort();
}
