//! Integration tests for emissions-assist with the shipped rulebook.
//!
//! These cover the full path from a raw user message to the reply text,
//! for every persona, plus sessions built from configuration.

use emissions_assist::{respond, respond_as, AssistantConfig, ChatSession, Rulebook};
use emissions_core::{CompanyProfile, ComplianceStatus, Persona, Role};
use std::time::Duration;

/// Path to the rulebook relative to the workspace root
const RULES_PATH: &str = "grammars/assistant-rules.yaml";

fn workspace_path(relative: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join(relative).to_string_lossy().to_string()
}

const FALLBACK_PREFIX: &str = "I'm here to help with questions about CO₂ emissions";
const GREETING_REPLY: &str = "Hello! How can I assist you today with CO₂ emissions information?";

// =============================================================================
// Company persona
// =============================================================================

#[test]
fn test_non_compliant_summary() {
    let profile = CompanyProfile::default()
        .with_compliance(ComplianceStatus::NonCompliant)
        .with_emissions(12000.0)
        .with_yoy_change(5.0);

    let reply = respond("Can you summarize my report?", Persona::Company, Some(&profile));

    assert!(reply.starts_with("Based on your recent reports"));
    assert!(reply.contains("Non-Compliant"));
    assert!(reply.contains("12,000"));
    assert!(reply.contains("5%"));
    assert!(reply.contains("higher than last year"));
    assert!(reply.contains("remediation plan to LDEQ within 30 days"));
}

#[test]
fn test_compliant_summary_without_context() {
    let reply = respond("give me a summary", Persona::Company, None);

    assert!(reply.starts_with("Great news!"));
    assert!(reply.contains("an acceptable amount of tons of CO₂"));
    assert!(reply.contains("trending positively%"));
}

#[test]
fn test_compliant_summary_with_figures() {
    let profile = CompanyProfile::default()
        .with_compliance(ComplianceStatus::Compliant)
        .with_emissions(72300.0)
        .with_yoy_change(-2.5);

    let reply = respond("summary", Persona::Company, Some(&profile));
    assert!(reply.contains("emitted 72,300 tons"));
    assert!(reply.contains("year-over-year change is -2.5%"));
}

#[test]
fn test_non_compliant_summary_missing_figures() {
    let profile = CompanyProfile::default().with_compliance(ComplianceStatus::NonCompliant);
    let reply = respond("summarize", Persona::Company, Some(&profile));

    assert!(reply.contains("Non-Compliant"));
    assert!(reply.contains("an unreported amount of tons"));
    assert!(reply.contains("N/A%"));
}

#[test]
fn test_company_fixed_replies() {
    let advice = respond("How can we reduce emissions?", Persona::Company, None);
    assert!(advice.starts_with("Here are some recommendations to reduce your CO₂ emissions:\n\n1."));
    assert_eq!(advice.lines().filter(|l| l.starts_with(char::is_numeric)).count(), 6);

    let deadline = respond("When do I submit?", Persona::Company, None);
    assert!(deadline.starts_with("Your next quarterly report is due by the 15th"));
}

// =============================================================================
// Regulatory and public personas
// =============================================================================

#[test]
fn test_regulatory_replies() {
    assert!(respond("overall compliance?", Persona::Regulatory, None)
        .starts_with("Current overall compliance rate is 78%."));
    assert!(respond("any patterns this year", Persona::Regulatory, None)
        .starts_with("Emissions have decreased by 8.9% year-over-year"));
    assert!(respond("what action should we take", Persona::Regulatory, None)
        .starts_with("Based on current data, I recommend:"));
}

#[test]
fn test_public_replies() {
    assert!(respond("Explain the numbers", Persona::Public, None)
        .starts_with("CO₂ emissions are measured in tons"));
    let ranking = respond("which sector emits most", Persona::Public, None);
    assert!(ranking.contains("Oil & Gas industry is the largest emitter (4,500 kilotons)"));
    assert!(respond("is there a law about this", Persona::Public, None)
        .starts_with("Louisiana's emissions are regulated primarily"));
}

// =============================================================================
// Universal rules and fallback
// =============================================================================

#[test]
fn test_greeting_is_universal() {
    assert_eq!(respond("hello", Persona::Public, None), GREETING_REPLY);
    assert_eq!(respond("Hi there", Persona::Company, None), GREETING_REPLY);
}

#[test]
fn test_thanks_is_universal() {
    let reply = respond("Thanks!", Persona::Regulatory, None);
    assert!(reply.starts_with("You're welcome!"));
}

#[test]
fn test_gibberish_gets_fallback() {
    let reply = respond("asdkjASD", Persona::Regulatory, None);
    assert!(reply.starts_with(FALLBACK_PREFIX));
    assert_eq!(reply, Rulebook::builtin().fallback());
}

#[test]
fn test_unknown_persona_fails_closed() {
    let reply = respond_as("tell me about compliance", "shareholder", None);
    assert!(reply.starts_with(FALLBACK_PREFIX));
}

// =============================================================================
// Loading and sessions
// =============================================================================

#[test]
fn test_rulebook_file_matches_builtin() {
    let loaded = Rulebook::load(workspace_path(RULES_PATH)).unwrap();
    let builtin = Rulebook::builtin();

    for persona in Persona::ALL {
        assert_eq!(loaded.greeting(persona), builtin.greeting(persona));
        assert_eq!(
            loaded.respond("summary trend law thanks", persona, None),
            builtin.respond("summary trend law thanks", persona, None)
        );
    }
}

#[tokio::test]
async fn test_session_from_config() {
    let yaml = format!("reply_delay_ms: 20\nrules_path: {}\n", workspace_path(RULES_PATH));
    let config = AssistantConfig::from_yaml(&yaml).unwrap();
    assert_eq!(config.reply_delay(), Duration::from_millis(20));

    let profile = CompanyProfile::default()
        .with_emissions(98500.0)
        .with_yoy_change(-6.1)
        .with_compliance(ComplianceStatus::UnderReview);
    let mut chat = ChatSession::open(Persona::Company, Some(profile), &config).unwrap();

    assert!(chat.send("Summarize please"));
    assert!(chat.send("thanks"));
    assert_eq!(chat.transcript().len(), 3);

    chat.settle().await;
    let transcript = chat.transcript();
    let roles: Vec<Role> = transcript.iter().map(|t| t.role).collect();
    assert_eq!(
        roles,
        vec![Role::Assistant, Role::User, Role::User, Role::Assistant, Role::Assistant]
    );

    assert!(transcript[3].content.contains("98,500 tons"));
    assert!(transcript[3].content.contains("6.1% lower"));
    assert!(transcript[4].content.starts_with("You're welcome!"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_replies_follow_question_order() {
    let config = AssistantConfig::default().with_reply_delay(Duration::from_millis(10));
    let mut chat = ChatSession::open(Persona::Regulatory, None, &config).unwrap();

    for question in ["compliance?", "any trend?", "what action?", "thanks"] {
        assert!(chat.send(question));
    }
    chat.settle().await;

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 9);
    let replies: Vec<&str> = transcript[5..].iter().map(|t| t.content.as_str()).collect();
    assert!(replies[0].starts_with("Current overall compliance rate"));
    assert!(replies[1].starts_with("Emissions have decreased"));
    assert!(replies[2].starts_with("Based on current data"));
    assert!(replies[3].starts_with("You're welcome!"));
}

#[test]
fn test_session_without_runtime_refuses_messages() {
    let mut chat = ChatSession::open(Persona::Public, None, &AssistantConfig::default()).unwrap();
    assert_eq!(chat.title(), "Public Information Assistant");
    assert!(!chat.send("hello"));
    assert_eq!(chat.transcript().len(), 1);
}
