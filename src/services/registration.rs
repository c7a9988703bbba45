//! Registration service implementation
//!
//! Individual and team registration workflows. Every write goes through the
//! same eligibility engine the preview endpoint uses, so a user is never
//! shown a different answer than the one enforced here.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::database::store::{EventStore, ParticipantStore};
use crate::eligibility::{evaluate, RegistrationDecision};
use crate::models::event::Event;
use crate::models::participant::{
    Participant, PaymentStatus, RegisterParticipantRequest, RegisterTeamRequest, RegistrationType,
    TeamMemberData,
};
use crate::models::role::Role;
use crate::models::ticket::TicketCode;
use crate::services::roles::RoleResolver;
use crate::utils::clock::Clock;
use crate::utils::errors::{GenesisError, Result};
use crate::utils::helpers;
use crate::utils::logging::log_registration_decision;

/// Registration workflows over the store seam
#[derive(Clone)]
pub struct RegistrationService {
    events: Arc<dyn EventStore>,
    participants: Arc<dyn ParticipantStore>,
    roles: Arc<dyn RoleResolver>,
    clock: Arc<dyn Clock>,
}

impl RegistrationService {
    pub fn new(
        events: Arc<dyn EventStore>,
        participants: Arc<dyn ParticipantStore>,
        roles: Arc<dyn RoleResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            participants,
            roles,
            clock,
        }
    }

    /// Eligibility preview for an event, as shown to the user before they
    /// commit to the form
    pub async fn check_eligibility(
        &self,
        event_id: Uuid,
        email: Option<&str>,
    ) -> Result<RegistrationDecision> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id })?;

        let role = email
            .map(|email| self.roles.resolve(email))
            .unwrap_or(Role::Participant);
        let decision = evaluate(&event, email, role, self.clock.now());
        log_registration_decision(event_id, email, decision.allowed, &decision.reason);

        Ok(decision)
    }

    /// Register a single participant
    ///
    /// `actor_email` is the signed-in account performing the registration;
    /// volunteers registering someone at the desk act under their own role.
    /// Defaults to the participant's email for self-registration.
    pub async fn register_participant(
        &self,
        actor_email: Option<&str>,
        request: RegisterParticipantRequest,
    ) -> Result<Participant> {
        validate_identity(&request.full_name, &request.email, &request.phone)?;

        let event = self
            .events
            .get_event(request.event_id)
            .await?
            .ok_or(GenesisError::EventNotFound {
                event_id: request.event_id,
            })?;

        if event.is_team_event {
            return Err(GenesisError::TeamEventRequiresTeam { event_id: event.id });
        }

        if self
            .participants
            .find_by_email(event.id, &request.email)
            .await?
            .is_some()
        {
            return Err(GenesisError::InvalidInput(format!(
                "{} is already registered for this event",
                request.email
            )));
        }

        let registration_type = self.admit(&event, actor_email.or(Some(request.email.as_str())))?;

        if let Some(method) = request.payment_method {
            if !event.payment_channel_for(registration_type).accepts(method) {
                return Err(GenesisError::InvalidInput(format!(
                    "{} payment is not accepted for this registration",
                    method
                )));
            }
        }

        let now = self.clock.now();
        let participant = Participant {
            id: Uuid::new_v4(),
            event_id: event.id,
            full_name: helpers::normalize_whitespace(&request.full_name),
            email: request.email.to_lowercase(),
            phone: request.phone,
            college: request.college,
            standard: request.standard,
            stream: request.stream,
            ticket_code: TicketCode::generate(),
            payment_status: PaymentStatus::Pending,
            payment_method: request.payment_method,
            receipt_url: None,
            transaction_id: None,
            registration_type,
            entry_fee_paid: event.entry_fee_for(registration_type),
            team_id: None,
            team_name: None,
            is_team_lead: false,
            is_verified: false,
            verification_time: None,
            assigned_room: None,
            registered_at: now,
            updated_at: now,
        };

        let mut inserted = self
            .participants
            .insert_registration(vec![participant])
            .await?;
        let participant = inserted
            .pop()
            .ok_or_else(|| GenesisError::ServiceUnavailable("registration insert returned no row".to_string()))?;

        info!(
            participant_id = %participant.id,
            event_id = %event.id,
            registration_type = %participant.registration_type,
            "Participant registered"
        );
        Ok(participant)
    }

    /// Register a full team as one unit
    ///
    /// Either every member lands or none does; a failing member insert rolls
    /// back the whole team and the event counter.
    pub async fn register_team(
        &self,
        actor_email: Option<&str>,
        request: RegisterTeamRequest,
    ) -> Result<Vec<Participant>> {
        let event = self
            .events
            .get_event(request.event_id)
            .await?
            .ok_or(GenesisError::EventNotFound {
                event_id: request.event_id,
            })?;

        if !event.is_team_event {
            return Err(GenesisError::NotATeamEvent { event_id: event.id });
        }

        let max_members = event.members_per_team.unwrap_or(1).max(1) as usize;
        if request.members.is_empty() || request.members.len() > max_members {
            return Err(GenesisError::TeamSizeViolation {
                got: request.members.len(),
                max: max_members as u32,
            });
        }

        for member in &request.members {
            validate_identity(&member.full_name, &member.email, &member.phone)?;
        }

        if let Some(max_teams) = event.max_teams {
            let registered = self.events.count_teams(event.id).await?;
            if registered >= max_teams as i64 {
                return Err(GenesisError::CapacityExhausted { event_id: event.id });
            }
        }

        let lead_email = request.members[0].email.clone();
        let registration_type = self.admit(&event, actor_email.or(Some(lead_email.as_str())))?;

        if let Some(method) = request.payment_method {
            if !event.payment_channel_for(registration_type).accepts(method) {
                return Err(GenesisError::InvalidInput(format!(
                    "{} payment is not accepted for this registration",
                    method
                )));
            }
        }

        let now = self.clock.now();
        let team_id = Uuid::new_v4();
        let team_name = helpers::normalize_whitespace(&request.team_name);
        let members: Vec<Participant> = request
            .members
            .iter()
            .enumerate()
            .map(|(index, member)| {
                build_team_member(
                    &event,
                    member,
                    team_id,
                    &team_name,
                    index == 0,
                    registration_type,
                    request.payment_method,
                    now,
                )
            })
            .collect();

        let inserted = self.participants.insert_registration(members).await?;

        info!(
            team_id = %team_id,
            event_id = %event.id,
            members = inserted.len(),
            "Team registered"
        );
        Ok(inserted)
    }

    /// All participants registered for an event
    pub async fn list_event_participants(&self, event_id: Uuid) -> Result<Vec<Participant>> {
        self.events
            .get_event(event_id)
            .await?
            .ok_or(GenesisError::EventNotFound { event_id })?;
        self.participants.list_for_event(event_id).await
    }

    /// Run the eligibility engine at write time and admit or reject
    fn admit(&self, event: &Event, email: Option<&str>) -> Result<RegistrationType> {
        let role = email
            .map(|email| self.roles.resolve(email))
            .unwrap_or(Role::Participant);
        let decision = evaluate(event, email, role, self.clock.now());
        log_registration_decision(event.id, email, decision.allowed, &decision.reason);

        if !decision.allowed {
            return Err(GenesisError::RegistrationClosed {
                reason: decision.reason,
            });
        }
        Ok(decision
            .registration_type
            .unwrap_or(RegistrationType::Regular))
    }
}

fn validate_identity(full_name: &str, email: &str, phone: &str) -> Result<()> {
    if full_name.trim().is_empty() {
        return Err(GenesisError::InvalidInput("name is required".to_string()));
    }
    if !helpers::is_valid_email(email) {
        return Err(GenesisError::InvalidInput(format!(
            "invalid email: {}",
            email
        )));
    }
    if !helpers::is_valid_phone(phone) {
        return Err(GenesisError::InvalidInput(format!(
            "invalid phone number: {}",
            phone
        )));
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_team_member(
    event: &Event,
    member: &TeamMemberData,
    team_id: Uuid,
    team_name: &str,
    is_team_lead: bool,
    registration_type: RegistrationType,
    payment_method: Option<crate::models::participant::PaymentMethod>,
    now: chrono::DateTime<chrono::Utc>,
) -> Participant {
    debug!(team_id = %team_id, email = %member.email, "Building team member record");
    Participant {
        id: Uuid::new_v4(),
        event_id: event.id,
        full_name: helpers::normalize_whitespace(&member.full_name),
        email: member.email.to_lowercase(),
        phone: member.phone.clone(),
        college: member.college.clone(),
        standard: member.standard.clone(),
        stream: member.stream.clone(),
        ticket_code: TicketCode::generate(),
        payment_status: PaymentStatus::Pending,
        payment_method,
        receipt_url: None,
        transaction_id: None,
        registration_type,
        entry_fee_paid: event.entry_fee_for(registration_type),
        team_id: Some(team_id),
        team_name: Some(team_name.to_string()),
        is_team_lead,
        is_verified: false,
        verification_time: None,
        assigned_room: None,
        registered_at: now,
        updated_at: now,
    }
}
