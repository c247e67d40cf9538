use super::{
    create_task::CreateTaskUseCase,
    delete_task::DeleteTaskUseCase,
    update_task::{UpdateTaskUseCase, UseCaseRes},
};
use crate::shared::{relay::emit, usecase::Subscriber};
use taskpulse_api_structs::{
    dtos::{DeletedTargetDTO, TaskDTO},
    RealtimeEvent,
};
use taskpulse_domain::Task;
use taskpulse_infra::TaskpulseContext;

pub struct RelayCreatedTask;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateTaskUseCase> for RelayCreatedTask {
    async fn notify(&self, task: &Task, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::NewTask(TaskDTO::new(task.clone()));
        emit(event, &task.owner_id, ctx).await;
    }
}

/// The new owner gets the updated `Task`, a previous owner is told it is gone
pub struct RelayUpdatedTask;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateTaskUseCase> for RelayUpdatedTask {
    async fn notify(&self, res: &UseCaseRes, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::UpdateTask(TaskDTO::new(res.task.clone()));
        emit(event, &res.task.owner_id, ctx).await;

        if let Some(previous_owner_id) = &res.previous_owner_id {
            let event = RealtimeEvent::DeleteTask(DeletedTargetDTO {
                id: res.task.id.clone(),
            });
            emit(event, previous_owner_id, ctx).await;
        }
    }
}

pub struct RelayDeletedTask;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteTaskUseCase> for RelayDeletedTask {
    async fn notify(&self, task: &Task, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::DeleteTask(DeletedTargetDTO {
            id: task.id.clone(),
        });
        emit(event, &task.owner_id, ctx).await;
    }
}
