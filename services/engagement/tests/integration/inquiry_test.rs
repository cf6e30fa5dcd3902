use chrono::Utc;
use uuid::Uuid;

use domus_engagement::domain::types::InquiryStatus;
use domus_engagement::error::EngagementServiceError;
use domus_engagement::usecase::inquiry::{SubmitInquiryInput, SubmitInquiryUseCase};

use crate::helpers::{
    MockInquiryRepo, MockOtpRepo, MockPublisher, verified_challenge,
};

fn anonymous_input(email: &str) -> SubmitInquiryInput {
    SubmitInquiryInput {
        property_id: Uuid::new_v4(),
        property_title: Some("Lakeside Villa".to_owned()),
        user_id: None,
        first_name: "Alex".to_owned(),
        last_name: "Doe".to_owned(),
        email: email.to_owned(),
        phone: Some("555-0142".to_owned()),
        message: "Is the garden included?".to_owned(),
        is_authenticated: false,
    }
}

fn authenticated_input(user_id: i64) -> SubmitInquiryInput {
    SubmitInquiryInput {
        user_id: Some(user_id),
        is_authenticated: true,
        ..anonymous_input("member@example.com")
    }
}

fn usecase(
    inquiries: MockInquiryRepo,
    otps: MockOtpRepo,
    notifier: MockPublisher,
) -> SubmitInquiryUseCase<MockInquiryRepo, MockOtpRepo, MockPublisher> {
    SubmitInquiryUseCase {
        inquiries,
        otps,
        notifier,
    }
}

#[tokio::test]
async fn authenticated_users_bypass_the_otp_gate() {
    let inquiries = MockInquiryRepo::empty();
    let stored = inquiries.inquiries_handle();
    let publisher = MockPublisher::new();
    let published = publisher.published_handle();

    // No challenge exists at all; the submission still goes through.
    let uc = usecase(inquiries, MockOtpRepo::empty(), publisher);
    let inquiry = uc.execute(authenticated_input(7)).await.unwrap();

    assert!(inquiry.is_authenticated);
    assert_eq!(inquiry.status, InquiryStatus::New);
    assert_eq!(stored.lock().unwrap().len(), 1);

    let published = published.lock().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].recipient_role, "admin");
}

#[tokio::test]
async fn authenticated_submission_requires_a_positive_user_id() {
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::empty(),
        MockPublisher::new(),
    );

    for user_id in [None, Some(0), Some(-3)] {
        let result = uc
            .execute(SubmitInquiryInput {
                user_id,
                ..authenticated_input(7)
            })
            .await;
        assert!(matches!(result, Err(EngagementServiceError::InvalidUserId)));
    }
}

#[tokio::test]
async fn anonymous_submission_requires_a_verified_challenge() {
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::empty(),
        MockPublisher::new(),
    );

    let result = uc.execute(anonymous_input("visitor@example.com")).await;
    assert!(matches!(
        result,
        Err(EngagementServiceError::EmailNotVerified)
    ));
}

#[tokio::test]
async fn an_unverified_challenge_is_not_enough() {
    let mut challenge = verified_challenge("visitor@example.com");
    challenge.verified_at = None;
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::new(vec![challenge]),
        MockPublisher::new(),
    );

    let result = uc.execute(anonymous_input("visitor@example.com")).await;
    assert!(matches!(
        result,
        Err(EngagementServiceError::EmailNotVerified)
    ));
}

#[tokio::test]
async fn anonymous_submission_consumes_the_challenge() {
    let otps = MockOtpRepo::new(vec![verified_challenge("visitor@example.com")]);
    let challenges = otps.challenges_handle();
    let inquiries = MockInquiryRepo::empty();
    let stored = inquiries.inquiries_handle();

    let uc = usecase(inquiries, otps, MockPublisher::new());
    let inquiry = uc.execute(anonymous_input("visitor@example.com")).await.unwrap();

    assert!(!inquiry.is_authenticated);
    assert_eq!(stored.lock().unwrap().len(), 1);
    assert!(
        challenges.lock().unwrap()[0].consumed_at.is_some(),
        "accepting the inquiry must spend the challenge"
    );
}

#[tokio::test]
async fn a_spent_challenge_cannot_back_a_second_submission() {
    let otps = MockOtpRepo::new(vec![verified_challenge("visitor@example.com")]);
    let challenges = otps.challenges_handle();
    let uc = usecase(MockInquiryRepo::empty(), otps, MockPublisher::new());

    uc.execute(anonymous_input("visitor@example.com")).await.unwrap();
    let result = uc.execute(anonymous_input("visitor@example.com")).await;

    assert!(matches!(
        result,
        Err(EngagementServiceError::EmailNotVerified)
    ));
    assert_eq!(challenges.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn submission_email_matching_is_case_insensitive() {
    let otps = MockOtpRepo::new(vec![verified_challenge("visitor@example.com")]);
    let uc = usecase(MockInquiryRepo::empty(), otps, MockPublisher::new());

    let result = uc.execute(anonymous_input("Visitor@Example.COM")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn blank_names_or_message_are_missing_data() {
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::new(vec![verified_challenge("visitor@example.com")]),
        MockPublisher::new(),
    );

    for input in [
        SubmitInquiryInput {
            first_name: "  ".to_owned(),
            ..anonymous_input("visitor@example.com")
        },
        SubmitInquiryInput {
            last_name: String::new(),
            ..anonymous_input("visitor@example.com")
        },
        SubmitInquiryInput {
            message: "\n".to_owned(),
            ..anonymous_input("visitor@example.com")
        },
    ] {
        let result = uc.execute(input).await;
        assert!(matches!(result, Err(EngagementServiceError::MissingData)));
    }
}

#[tokio::test]
async fn malformed_email_is_rejected_before_the_otp_check() {
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::empty(),
        MockPublisher::new(),
    );

    let result = uc.execute(anonymous_input("not-an-email")).await;
    assert!(matches!(result, Err(EngagementServiceError::InvalidEmail)));
}

#[tokio::test]
async fn inquiry_timestamps_are_set_at_submission() {
    let before = Utc::now();
    let uc = usecase(
        MockInquiryRepo::empty(),
        MockOtpRepo::empty(),
        MockPublisher::new(),
    );

    let inquiry = uc.execute(authenticated_input(7)).await.unwrap();
    assert!(inquiry.created_at >= before && inquiry.created_at <= Utc::now());
}
