//! Crate-level integration and BDD tests.

use std::sync::{Arc, mpsc};

use crate::capability::CapabilityRegistry;
use crate::context::{ContextKey, keys};
use crate::execution::{InlineExecutor, SharedExecutor, TaskExecutor};
use crate::manager::CommandManager;


const PLATFORM_SENDER: ContextKey<u32> = keys::platform_command_sender::<u32>();

#[test]
fn well_known_keys_flow_through_the_manager() {
    let mut manager: CommandManager<String> =
        CommandManager::new(Arc::new(CapabilityRegistry::default()));
    manager.register_preprocessor_fn(|preprocessing| {
        let context = preprocessing.command_context_mut();
        context.store(&PLATFORM_SENDER, 7);
        context.compute_if_absent(&keys::EXECUTION_AFFINITY_EXECUTOR, |_| {
            Arc::new(InlineExecutor) as SharedExecutor
        })?;
        Ok(())
    });

    let result = manager.execute(String::from("console"), "whoami", |context, _| {
        let sender = context.get(&PLATFORM_SENDER).copied().ok();
        let executor = context.get(&keys::EXECUTION_AFFINITY_EXECUTOR).ok().cloned();
        let (done, finished) = mpsc::channel();
        if let (Some(sender), Some(executor)) = (sender, executor) {
            TaskExecutor::execute(executor.as_ref(), Box::new(move || {
                done.send(sender).unwrap_or_default();
            }));
        }
        Ok(finished.try_recv().ok())
    });

    assert_eq!(result.ok().flatten(), Some(7));
}
