// End-to-end tests for the speech synthesis backend
//
// Each test serves the real router on an ephemeral port. Two wiremock
// servers stand in for ElevenLabs and Supabase Storage, and every test gets
// its own temp artifact directory so cleanup can be asserted.

mod helpers;
