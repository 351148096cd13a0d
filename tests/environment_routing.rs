//! Environment routing and agent lifecycle scenarios.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::json;
use uuid::Uuid;

use boulevard::agents::{Agent, BuilderAgent, ProjectManagerAgent};
use boulevard::connectors::Connectors;
use boulevard::domain::{Task, TaskKind};
use boulevard::environment::Environment;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("boulevard-it-{}", Uuid::new_v4()))
}

fn create_project_task(targets: &[&str]) -> Task {
    Task::new(
        TaskKind::CreateProject {
            name: "demo".to_string(),
            framework: "flask".to_string(),
        },
        targets.iter().map(|s| s.to_string()).collect(),
    )
}

#[tokio::test]
async fn registered_target_always_reaches_its_agent() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
        .await;

    let result = env.distribute_task(create_project_task(&["pm-1"])).await;
    assert!(result.is_success());
    assert_eq!(
        result.get("project_details").and_then(|d| d.get("framework")),
        Some(&json!("flask"))
    );
}

#[tokio::test]
async fn empty_and_unknown_target_lists_invoke_no_agent() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
        .await;

    for targets in [&[][..], &["ghost-1"][..]] {
        let result = env.distribute_task(create_project_task(targets)).await;
        assert!(!result.is_success());
        assert_eq!(result.message.as_deref(), Some("No suitable agent found"));
    }
    // The registered agent never saw a task.
    let pm = env.agent("pm-1").unwrap();
    assert!(!pm.core().is_busy());
}

#[tokio::test]
async fn build_succeeds_deterministically_without_connectors() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(
        BuilderAgent::new("builder-1").with_build_delay(Duration::ZERO),
    ))
    .await;

    let result = env
        .distribute_task(Task::new(
            TaskKind::Build {
                framework: "flask".to_string(),
                project_name: "demo".to_string(),
            },
            vec!["builder-1".to_string()],
        ))
        .await;

    assert!(result.is_success());
    assert_eq!(result.get("framework"), Some(&json!("flask")));
    assert!(result.get("crewai_task_id").is_none());
    assert!(result.get("taskade_item_id").is_none());
    assert!(result.get("timestamp").is_some());
}

#[tokio::test]
async fn local_build_without_path_short_circuits_before_routing() {
    let empty_env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    let mut full_env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    full_env
        .register_agent(Box::new(BuilderAgent::new("builder-1")))
        .await;

    for env in [&empty_env, &full_env] {
        let result = env
            .distribute_task(Task::new(
                TaskKind::LocalBuild {
                    framework: "flask".to_string(),
                    project_name: "demo".to_string(),
                    project_path: None,
                },
                vec!["builder-1".to_string()],
            ))
            .await;
        assert!(!result.is_success());
        assert_eq!(
            result.message.as_deref(),
            Some("Project path is required for local build")
        );
    }
}

#[tokio::test]
async fn reregistration_resolves_to_the_second_instance() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(ProjectManagerAgent::new("worker-1")))
        .await;
    // Same id, different role: replaces silently, no error.
    env.register_agent(Box::new(BuilderAgent::new("worker-1")))
        .await;

    assert_eq!(env.agent_count(), 1);

    // A builder rejects create_project, proving the second instance answers.
    let result = env.distribute_task(create_project_task(&["worker-1"])).await;
    assert_eq!(result.message.as_deref(), Some("Unsupported task type"));
}

#[tokio::test]
async fn reregistration_keeps_the_original_routing_position() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(ProjectManagerAgent::new("worker-1")))
        .await;
    env.register_agent(Box::new(ProjectManagerAgent::new("worker-2")))
        .await;
    // Re-registering worker-1 replaces it in place, ahead of worker-2.
    env.register_agent(Box::new(BuilderAgent::new("worker-1")))
        .await;

    assert_eq!(env.agent_count(), 2);
    assert_eq!(env.registered_agents(), vec!["worker-1", "worker-2"]);

    // Both ids qualify; first-match must hit the replaced worker-1, whose
    // builder role rejects the task. Were worker-1 pushed to the back,
    // worker-2 would answer with a success instead.
    let result = env
        .distribute_task(create_project_task(&["worker-1", "worker-2"]))
        .await;
    assert_eq!(result.message.as_deref(), Some("Unsupported task type"));
}

#[tokio::test]
async fn message_round_trip_between_registered_agents() {
    let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
    env.register_agent(Box::new(BuilderAgent::new("builder-1")))
        .await;
    env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
        .await;

    let builder = env.agent("builder-1").unwrap();
    let pm = env.agent("pm-1").unwrap();

    builder.send_message(&pm.mailbox(), json!({"status": "build finished"}));

    let message = pm.receive_message().await.expect("message should arrive");
    assert_eq!(message.from, "builder-1");
    assert_eq!(message.content, json!({"status": "build finished"}));
    assert!(pm.core().try_receive_message().is_none());
}

#[tokio::test]
async fn single_flight_gate_serializes_concurrent_tasks() {
    let agent = BuilderAgent::new("builder-1").with_build_delay(Duration::from_millis(200));
    let task = |n: u32| {
        Task::new(
            TaskKind::Build {
                framework: "flask".to_string(),
                project_name: format!("demo-{n}"),
            },
            vec!["builder-1".to_string()],
        )
    };

    let start = Instant::now();
    let (first, second) = tokio::join!(agent.handle_task(task(1)), agent.handle_task(task(2)));
    assert!(first.is_success() && second.is_success());
    // Two 200ms builds on one instance must run back to back, not overlap.
    assert!(start.elapsed() >= Duration::from_millis(400));
}
