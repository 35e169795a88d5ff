// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

struct StubExecutor {
    outcome: RawCheckOutcome,
}

#[async_trait]
impl CheckExecutor for StubExecutor {
    async fn execute(&mut self, _command_line: &str, _timeout: Duration) -> RawCheckOutcome {
        self.outcome.clone()
    }
}

#[tokio::test]
async fn traced_executor_passes_through_the_inner_outcome() {
    let stub = StubExecutor {
        outcome: RawCheckOutcome {
            output: "OK".to_string(),
            return_code: 0,
            early_timeout: false,
            exited_ok: true,
        },
    };
    let mut traced = TracedExecutor::new(stub);
    let outcome = traced.execute("echo OK", Duration::from_secs(5)).await;
    assert_eq!(outcome.output, "OK");
    assert_eq!(outcome.return_code, 0);
}

#[tokio::test]
async fn traced_executor_passes_through_a_timeout() {
    let stub = StubExecutor {
        outcome: RawCheckOutcome::timed_out(10),
    };
    let mut traced = TracedExecutor::new(stub);
    let outcome = traced.execute("sleep 100", Duration::from_secs(10)).await;
    assert!(outcome.early_timeout);
}
