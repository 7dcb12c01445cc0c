#![allow(dead_code)]

pub mod fixtures {
    use brrtrouter_dsl::rules::RouteSource;

    /// Host every request in the fixtures is sent to
    pub const SAMPLE_HOST: &str = "samplehost.org";

    pub const MAIN_ROUTES: &str = r#"
# Routes
# This file defines all application routes (Higher priority routes first)
# ~~~~

GET     /simpleaction                           myTestController.simpleAction
GET     /param                                  myTestController.paramAction(param:'default')
GET     /param/{param}                          myTestController.paramAction
GET     /http                                   myTestController.httpAction(type:'GET')
PUT     /http                                   myTestController.httpAction(type:'PUT')
POST    /http                                   myTestController.httpAction(type:'POST')
DELETE  /http                                   myTestController.httpAction(type:'DELETE')
GET     /regex/{<[0-9]+>number}                 myTestController.regexNumberAction
GET     /regex/{<[a-z]+>string}                 myTestController.regexStringAction
GET     host:samplehost.org /host               myTestController.hostAction
GET     /caseinsensitive                        MyTestCONTROLLER.caseInsensitive

# Query string constraints
GET     /qsparampresence [qsParamA]                             myTestController.qsParamPresence
GET     /qsparamnegatepresence [!qsParamA]                      myTestController.qsParamNegatePresence
GET     /qsparamemptyvaluerequired [qsParamA=]                  myTestController.qsParamEmptyValueRequired
GET     /qsparamspecificvaluerequired [qsParamA=abc]            myTestController.qsParamSpecificValueRequired
POST    /qsparamspecificvaluerequiredpost [qsParamA=abc]        myTestController.qsParamSpecificValueRequiredPost
GET     /qsparamnegatespecificvalue [qsParamA!=abc]             myTestController.qsParamNegateSpecificValue
GET     /qsparamtwoparamsrequired [qsParamA=abc,qsParamB]       myTestController.qsParamTwoParamsRequired
GET     /qsparamencodedvalueandrandomspaces [ qsParamA=%20   qsParamB=a+b   qsParamC=%C3%A9t%C3%A9  ] myTestController.qsParamEncodedValueAndRandomSpaces
GET     /qsparamplaynicewithotherroutingfeatures/name/{<[a-z]+>myName} [qsParamA=abc] bindTestController.qsParamPlayNiceWithOtherRoutingFeatures(myStaticArg:'So Long, and Thanks for All the Fish')
"#;

    pub const ADDITIONAL_ROUTES: &str = "GET     /additionalroute        myTestController.additionalRouteFile\n";

    pub const WILDCARD_A_ROUTES: &str = "GET     /wildcard-a             myTestController.wildcardA\n";

    pub const WILDCARD_B_ROUTES: &str = "GET     /wildcard-b             myTestController.wildcardB\n";

    pub fn sources() -> Vec<RouteSource> {
        vec![
            RouteSource::new("mappingroutes.conf", MAIN_ROUTES),
            RouteSource::new("addroutes.conf", ADDITIONAL_ROUTES),
            RouteSource::new("wildcard-a.conf", WILDCARD_A_ROUTES),
            RouteSource::new("wildcard-b.conf", WILDCARD_B_ROUTES),
        ]
    }
}

pub mod temp_files {
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Write `content` to a fresh temporary routes file
    pub fn create_temp_routes(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("brrt_routes_")
            .suffix(".routes")
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
