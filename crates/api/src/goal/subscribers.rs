use super::{
    create_goal::CreateGoalUseCase,
    delete_goal::DeleteGoalUseCase,
    update_goal::{UpdateGoalUseCase, UseCaseRes},
};
use crate::shared::{relay::emit, usecase::Subscriber};
use taskpulse_api_structs::{
    dtos::{DeletedTargetDTO, GoalDTO},
    RealtimeEvent,
};
use taskpulse_domain::Goal;
use taskpulse_infra::TaskpulseContext;

pub struct RelayCreatedGoal;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateGoalUseCase> for RelayCreatedGoal {
    async fn notify(&self, goal: &Goal, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::NewGoal(GoalDTO::new(goal.clone()));
        emit(event, &goal.owner_id, ctx).await;
    }
}

pub struct RelayUpdatedGoal;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateGoalUseCase> for RelayUpdatedGoal {
    async fn notify(&self, res: &UseCaseRes, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::GoalUpdated(GoalDTO::new(res.goal.clone()));
        emit(event, &res.goal.owner_id, ctx).await;

        if let Some(previous_owner_id) = &res.previous_owner_id {
            let event = RealtimeEvent::GoalDeleted(DeletedTargetDTO {
                id: res.goal.id.clone(),
            });
            emit(event, previous_owner_id, ctx).await;
        }
    }
}

pub struct RelayDeletedGoal;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeleteGoalUseCase> for RelayDeletedGoal {
    async fn notify(&self, goal: &Goal, ctx: &TaskpulseContext) {
        let event = RealtimeEvent::GoalDeleted(DeletedTargetDTO {
            id: goal.id.clone(),
        });
        emit(event, &goal.owner_id, ctx).await;
    }
}
