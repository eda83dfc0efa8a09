use crate::telescope_control::state::AdapterState;
use crate::telescope_control::TelescopeAdapter;
use crate::util::*;

impl TelescopeAdapter {
    /// Asks the client to connect the telescope, whatever its current state
    pub async fn connect_telescope(&self) {
        let state = self.state.lock().await;
        Self::report("connect", self.request_connection(&state, true).await);
    }

    pub async fn disconnect_telescope(&self) {
        let state = self.state.lock().await;
        Self::report("disconnect", self.request_connection(&state, false).await);
    }

    async fn request_connection(&self, state: &AdapterState, connect: bool) -> AdapterResult<()> {
        let name = state.telescope()?.name();
        let result = if connect {
            tracing::info!("Connecting to {}", name);
            self.client.connect_device(name).await
        } else {
            tracing::info!("Disconnecting from {}", name);
            self.client.disconnect_device(name).await
        };
        if let Err(e) = result {
            tracing::error!("Connection request for {} failed: {}", name, e);
        }
        Ok(())
    }
}
