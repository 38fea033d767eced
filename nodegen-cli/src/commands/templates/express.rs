//! Express sources for the generated project.

/// `src/v1/routes/index.js`: an empty router with a commented-out mount.
pub const ROUTES_INDEX_JS: &str = "\"use strict\"; \n\
const express = require(\"express\"); \n\
const router = express.Router(); \n \
//router.use(\"/v1/api\", require(\"./access\"));\n\
module.exports = router;";

/// `src/app.js`: mounts the v1 router at `/`.
pub const APP_JS: &str = "const express = require(\"express\"); \n\
const app = express(); \n\
// init middlewares \n\
// init db \n\
// init routes \n\
app.use(\"/\", require(\"./v1/routes\")); \n\
// handling error \n\
module.exports = app;";

/// `server.js`: listens on port 3000 and closes the server on SIGINT.
pub const SERVER_JS: &str = "const app = require('./src/app'); \n\
const PORT = '3000'; \n\
const server = app.listen(PORT, () => { \n\
console.log(`Server is running at ${PORT}`);}); \n\
process.on('SIGINT', () => {\n \
server.close(() => {\n   \
console.log(`Exit server express`);\n \
});});";
