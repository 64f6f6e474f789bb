// SPDX-FileCopyrightText: 2026 Zenith Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Campaign wizard state machine.
//!
//! Five stages: Architect (product/audience selection), Strategy
//! (variation choice), Creative (asset and CTA), Transmission (sender and
//! delivery mode, launch), Operation (read-only summary). Transitions are
//! guarded methods on [`Wizard`]; the state enum makes illegal jumps
//! unrepresentable, and `&mut self` on `launch` keeps at most one mission
//! in flight.

use thiserror::Error;
use tracing::info;

use zenith_core::ZenithError;
use zenith_core::traits::{CampaignRecorder, ContentGenerator, MessageSender, VariationRequest};
use zenith_core::types::{
    AssetRef, Client, Credentials, MissionSummary, Product, Variation, VariationSet,
};

use crate::audience::Segment;
use crate::broadcast::{BroadcastEngine, DeliveryMode, MissionOutcome, MissionSpec};

/// Inputs captured at the Architect stage.
#[derive(Debug, Clone)]
pub struct ArchitectForm {
    pub product: Product,
    pub language: String,
    pub segment: Segment,
    /// Audience resolved against the segment, in source order.
    pub audience: Vec<Client>,
}

/// Creative-stage state: the chosen draft plus asset and CTA.
#[derive(Debug, Clone)]
pub struct CreativeState {
    pub form: ArchitectForm,
    pub draft: Variation,
    /// At most one asset kind is active; setting a new one replaces it.
    pub asset: Option<AssetRef>,
    pub cta: Option<String>,
}

/// Wizard stage, tagged with the data each stage owns.
#[derive(Debug, Clone)]
pub enum WizardState {
    Architect,
    Strategy {
        form: ArchitectForm,
        set: VariationSet,
    },
    Creative(CreativeState),
    Transmission {
        creative: CreativeState,
    },
    Operation {
        summary: MissionSummary,
    },
}

impl WizardState {
    fn stage_name(&self) -> &'static str {
        match self {
            WizardState::Architect => "architect",
            WizardState::Strategy { .. } => "strategy",
            WizardState::Creative(_) => "creative",
            WizardState::Transmission { .. } => "transmission",
            WizardState::Operation { .. } => "operation",
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("resolved audience is empty; pick a different segment")]
    EmptyAudience,

    #[error("variation index {index} out of range (have {count})")]
    InvalidSelection { index: usize, count: usize },

    #[error("missing credential: {0}")]
    MissingCredential(ZenithError),

    #[error("cannot {action} from the {from} stage")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Engine(#[from] ZenithError),
}

/// The wizard controller. Holds the current stage and drives transitions.
#[derive(Debug, Default)]
pub struct Wizard {
    state: WizardState,
}

impl Default for WizardState {
    fn default() -> Self {
        WizardState::Architect
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    fn require_architect(&self, action: &'static str) -> Result<(), WizardError> {
        if matches!(self.state, WizardState::Architect) {
            Ok(())
        } else {
            Err(WizardError::InvalidTransition {
                from: self.state.stage_name(),
                action,
            })
        }
    }

    /// Submit the Architect stage: generate the variation set and advance
    /// to Strategy. Requires a non-empty resolved audience.
    pub async fn submit_architect<G: ContentGenerator>(
        &mut self,
        generator: &G,
        form: ArchitectForm,
        angle: &str,
    ) -> Result<(), WizardError> {
        self.require_architect("submit the brief")?;
        if form.audience.is_empty() {
            return Err(WizardError::EmptyAudience);
        }

        let request = VariationRequest {
            angle: angle.to_string(),
            product_name: form.product.productname.clone(),
            description: form.product.description.clone(),
            audience: form.segment.to_string(),
            price: form.product.price,
            language: form.language.clone(),
        };
        let set = generator.generate_variations(&request).await?;
        info!(variations = set.variations.len(), "strategy drafts ready");
        self.state = WizardState::Strategy { form, set };
        Ok(())
    }

    /// Submit a hand-written message, skipping Strategy entirely.
    pub fn submit_manual(
        &mut self,
        form: ArchitectForm,
        message: String,
    ) -> Result<(), WizardError> {
        self.require_architect("submit a manual message")?;
        if form.audience.is_empty() {
            return Err(WizardError::EmptyAudience);
        }
        let draft = Variation {
            title: "Manual Message".to_string(),
            message_text: message,
            image_prompt: String::new(),
            video_prompt: String::new(),
            audio_script: String::new(),
        };
        self.state = WizardState::Creative(CreativeState {
            form,
            draft,
            asset: None,
            cta: None,
        });
        Ok(())
    }

    /// Choose one of the generated variations and advance to Creative.
    pub fn select_variation(&mut self, index: usize) -> Result<(), WizardError> {
        match &mut self.state {
            WizardState::Strategy { form, set, .. } => {
                let count = set.variations.len();
                if index >= count {
                    return Err(WizardError::InvalidSelection { index, count });
                }
                let creative = CreativeState {
                    form: form.clone(),
                    draft: set.variations[index].clone(),
                    asset: None,
                    cta: None,
                };
                self.state = WizardState::Creative(creative);
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.stage_name(),
                action: "select a variation",
            }),
        }
    }

    /// Return to Architect, discarding variations and creative state.
    pub fn back_to_architect(&mut self) -> Result<(), WizardError> {
        match self.state {
            WizardState::Strategy { .. } | WizardState::Creative(_) => {
                self.state = WizardState::Architect;
                Ok(())
            }
            ref other => Err(WizardError::InvalidTransition {
                from: other.stage_name(),
                action: "go back",
            }),
        }
    }

    /// Attach an asset. Replaces any previous one: a mission carries at
    /// most one asset kind.
    pub fn set_asset(&mut self, asset: AssetRef) -> Result<(), WizardError> {
        match &mut self.state {
            WizardState::Creative(creative) => {
                creative.asset = Some(asset);
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.stage_name(),
                action: "attach an asset",
            }),
        }
    }

    /// Set the call-to-action link.
    pub fn set_cta(&mut self, cta: String) -> Result<(), WizardError> {
        match &mut self.state {
            WizardState::Creative(creative) => {
                creative.cta = if cta.trim().is_empty() { None } else { Some(cta) };
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.stage_name(),
                action: "set the CTA",
            }),
        }
    }

    /// Advance from Creative to Transmission. Unguarded beyond the stage
    /// check: text-only missions are valid.
    pub fn advance_to_transmission(&mut self) -> Result<(), WizardError> {
        match std::mem::take(&mut self.state) {
            WizardState::Creative(creative) => {
                self.state = WizardState::Transmission { creative };
                Ok(())
            }
            other => {
                let from = other.stage_name();
                self.state = other;
                Err(WizardError::InvalidTransition {
                    from,
                    action: "advance to transmission",
                })
            }
        }
    }

    /// Launch the mission.
    ///
    /// Guards: Transmission stage, access token present, sender identity
    /// resolvable. Advances to Operation only when the delivery loop ran
    /// to completion; a pre-flight failure or a credential abort leaves
    /// the wizard in Transmission so the operator can fix credentials and
    /// relaunch.
    pub async fn launch<S, R>(
        &mut self,
        engine: &BroadcastEngine<S, R>,
        credentials: &Credentials,
        sender_alias: Option<&str>,
        mode: DeliveryMode,
    ) -> Result<MissionOutcome, WizardError>
    where
        S: MessageSender,
        R: CampaignRecorder,
    {
        let creative = match &self.state {
            WizardState::Transmission { creative } => creative.clone(),
            other => {
                return Err(WizardError::InvalidTransition {
                    from: other.stage_name(),
                    action: "launch",
                });
            }
        };

        credentials
            .require_token()
            .map_err(WizardError::MissingCredential)?;
        credentials
            .resolve_sender(sender_alias)
            .map_err(WizardError::MissingCredential)?;

        let spec = MissionSpec {
            product_name: creative.form.product.productname.clone(),
            angle_title: creative.draft.title.clone(),
            message_text: creative.draft.message_text.clone(),
            cta_link: creative.cta.clone(),
            asset: creative.asset.clone(),
            audience: creative.form.audience.clone(),
            audience_label: creative.form.segment.to_string(),
            mode,
            sender_alias: sender_alias.unwrap_or("default").to_string(),
        };

        let outcome = engine.run(&spec).await?;
        if outcome.aborted.is_none() {
            self.state = WizardState::Operation {
                summary: outcome.summary.clone(),
            };
        }
        Ok(outcome)
    }

    /// Leave the Operation stage and clear all mission state.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        match self.state {
            WizardState::Operation { .. } => {
                self.state = WizardState::Architect;
                Ok(())
            }
            ref other => Err(WizardError::InvalidTransition {
                from: other.stage_name(),
                action: "reset",
            }),
        }
    }
}
