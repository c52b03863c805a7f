//! State codecs installed for blocks registered without properties

use crate::error::RegistryResult;
use crate::host::{Block, BlockStateData, StateDecoder, StateEncoder};
use crate::palette::StateProperties;
use std::sync::Arc;

/// Encodes every instance as `{name: identifier, states: {}}`
#[derive(Debug, Clone)]
pub struct EmptyStateEncoder {
    pub identifier: String,
}

impl StateEncoder for EmptyStateEncoder {
    fn encode(&self, _block: &dyn Block) -> RegistryResult<BlockStateData> {
        Ok(BlockStateData {
            name: self.identifier.clone(),
            states: StateProperties::new(),
        })
    }
}

/// Decodes every state to the one registered instance
#[derive(Debug, Clone)]
pub struct FixedStateDecoder {
    pub block: Arc<dyn Block>,
}

impl StateDecoder for FixedStateDecoder {
    fn decode(&self, _state: &BlockStateData) -> RegistryResult<Arc<dyn Block>> {
        Ok(Arc::clone(&self.block))
    }
}
